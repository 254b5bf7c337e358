use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    edubridge::cli::main()
}
