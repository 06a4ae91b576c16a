use registry_calc::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Output error: {e}");
        std::process::exit(1);
    }
}
