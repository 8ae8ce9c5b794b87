use std::io;

fn main() {
    let stdin = io::stdin();
    let code = pls7_cli::run(
        std::env::args(),
        &mut io::stdout(),
        &mut io::stderr(),
        &mut stdin.lock(),
    );
    std::process::exit(code);
}
