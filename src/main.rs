use committag::ui::output;

fn main() {
    if let Err(err) = committag::cli::run() {
        output::error(format!("{:#}", err));
        std::process::exit(1);
    }
}
