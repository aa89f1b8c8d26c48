fn main() -> std::process::ExitCode {
    padcycle_lib::run()
}
