use clap::Parser;
use livedocx_cli::cli::Cli;

fn main() {
    let cli = Cli::parse();

    match livedocx_cli::run(cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
