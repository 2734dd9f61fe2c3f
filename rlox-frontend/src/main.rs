use std::{
    io::{BufRead, Write},
    path::PathBuf,
    process::exit,
};

use clap::Parser as _;
use rlox_frontend::{ast_to_string, parse, scan, Diagnostics};

/// Scans and parses Lox expressions, printing the resulting syntax tree.
#[derive(clap::Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print every token before the syntax tree.
    #[arg(short, long)]
    tokens: bool,

    /// Script to read. Without it, lines are read from standard input.
    script: Option<PathBuf>,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        // usage errors exit with EX_USAGE; --help and --version keep clap's exit
        Err(err) if err.use_stderr() => {
            let _ = err.print();
            exit(64);
        }
        Err(err) => err.exit(),
    };
    let mut lox = Lox {
        print_tokens: args.tokens,
        diagnostics: Diagnostics::new(),
    };
    match args.script {
        Some(path) => lox.run_file(path),
        None => lox.run_prompt(),
    }
}

struct Lox {
    print_tokens: bool,
    diagnostics: Diagnostics,
}

impl Lox {
    fn run_file(&mut self, path: PathBuf) {
        let source = match std::fs::read_to_string(&path) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("failed to open {}: {err}", path.display());
                exit(66);
            }
        };
        self.run(&source);

        if self.diagnostics.had_error() {
            exit(65);
        }
    }

    fn run_prompt(&mut self) {
        let stdin = std::io::stdin();
        let mut reader = stdin.lock();
        loop {
            print!("> ");
            // a closed stdout only loses the prompt
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            match reader.read_line(&mut line) {
                Ok(0) => break,
                Ok(_) => {}
                Err(err) => {
                    eprintln!("failed to read line: {err}");
                    break;
                }
            }
            let line = line.trim_end_matches(['\n', '\r']);
            if line.trim() == "exit" {
                break;
            }
            self.run(line);
            self.diagnostics.reset();
        }
    }

    fn run(&mut self, source: &str) {
        let tokens = scan(source, &mut self.diagnostics);
        if self.print_tokens {
            for token in &tokens {
                println!("{token}");
            }
        }

        let expr = parse(tokens, &mut self.diagnostics);
        self.report();

        if let Some(expr) = expr.filter(|_| !self.diagnostics.had_error()) {
            println!("{}", ast_to_string(&expr));
        }
    }

    fn report(&self) {
        for err in &self.diagnostics {
            eprintln!("{err}");
        }
    }
}
