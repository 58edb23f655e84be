fn main() {
    std::process::exit(rootcheck::cli::run());
}
