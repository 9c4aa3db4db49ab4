use argh::FromArgs;
use std::io::{self, IsTerminal, Write};
use std::process;
use tinyshell::repl::{self, Editor, LineSource, Script};
use tinyshell::{Config, Interpreter, Outcome};

#[derive(FromArgs)]
/// A minimal interactive command interpreter.
struct Args {
    #[argh(option, short = 'c')]
    /// run a single command line and exit with its status
    command: Option<String>,

    #[argh(option)]
    /// colon-separated directories to search for executables (defaults to $PATH)
    path: Option<String>,

    #[argh(option)]
    /// prompt printed before each line in interactive mode
    prompt: Option<String>,

    #[argh(switch)]
    /// do not record lines in the line editor's history
    no_history: bool,
}

impl Args {
    fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(path) = &self.path {
            config = config.with_search_path(path);
        }
        if let Some(prompt) = &self.prompt {
            config = config.with_prompt(prompt);
        }
        config.history = !self.no_history;
        config
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Args = argh::from_env();
    let config = args.config();
    log::info!("search path: {:?}", config.search_path);

    let mut sh = Interpreter::new(&config)?;
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    let code = match &args.command {
        Some(line) => match sh.dispatch(line, &mut stdout, &mut stderr) {
            Outcome::Exit(code) => code,
            other => other.status().unwrap_or(0),
        },
        None => {
            let mut source: Box<dyn LineSource> = if io::stdin().is_terminal() {
                Box::new(Editor::new(config.history)?)
            } else {
                Box::new(Script::new(io::stdin().lock()))
            };
            repl::run(&mut sh, source.as_mut(), &config.prompt, &mut stdout, &mut stderr)?
        }
    };
    stdout.flush()?;
    process::exit(code)
}
