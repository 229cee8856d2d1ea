fn main() {
    // Parses arguments, initializes logging and config, then runs the command.
    let code = vizai::cli::process_cli();

    log::logger().flush();
    if code != 0 {
        std::process::exit(code);
    }
}
