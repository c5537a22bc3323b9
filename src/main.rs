mod cli;

fn main() {
    match cli::run() {
        Ok(code) => {
            #[allow(clippy::exit)]
            std::process::exit(code);
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            #[allow(clippy::exit)]
            std::process::exit(1);
        }
    }
}
