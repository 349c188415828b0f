use colored::Colorize;

pub fn run() {
    println!(
        "{} {}",
        "diorama".bold(),
        env!("CARGO_PKG_VERSION").green()
    );
    println!("{}", env!("CARGO_PKG_DESCRIPTION").dimmed());
}
