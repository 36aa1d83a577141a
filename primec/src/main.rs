use clap::Parser;
use primec::util::display::{print_code, Listing};
use primec::util::msg::{self, Msg};
use primec::Error;
use std::fs::File;
use std::io::BufWriter;

#[derive(Debug, clap::Parser)]
#[clap(author, version, about)]
struct Args {
    /// Input file
    #[clap(default_value = "main.prime")]
    input: String,

    /// Output file
    #[clap(short, long, default_value = "main.tam")]
    output: String,

    /// Print the generated code
    #[clap(short, long)]
    dump: bool,

    /// Write a YAML listing of the generated code
    #[clap(short, long)]
    listing: Option<String>,

    /// Treat code generation warnings as errors
    #[clap(short = 'W', long)]
    deny_warnings: bool,
}

fn main() {
    let args = Args::parse();

    let code = match std::fs::read_to_string(&args.input) {
        Ok(code) => code,
        Err(e) => {
            Msg::error(format!("Failed to read {}: {}", args.input, e)).print();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args, &code) {
        let msg = Msg::error(e.to_string());
        match e.pos() {
            Some(pos) => msg.at(&args.input, &code, pos).print(),
            None => msg.print(),
        }
        std::process::exit(1);
    }
}

fn run(args: &Args, code: &str) -> Result<(), Error> {
    // 1. Parse source into AST
    let ast = primec::parse(code)?;

    // 2. Resolve names
    let resolution = primec::check(&ast)?;

    // 3. Generate code
    let object = primec::encode(&ast, &resolution)?;
    let warnings: Vec<Msg> = object
        .warnings
        .iter()
        .map(|w| Msg::warn(w.to_string()))
        .collect();
    msg::dump(&warnings);
    if args.deny_warnings && !warnings.is_empty() {
        return Err(Error::DeniedWarnings(warnings.len()));
    }

    if args.dump {
        print_code(&ast, &object);
    }

    if let Some(path) = &args.listing {
        let file = BufWriter::new(File::create(path)?);
        serde_yaml::to_writer(file, &Listing::new(&ast, &object))?;
        Msg::note(format!("Listing written to {}", path)).print();
    }

    // 4. Write output
    let mut out = BufWriter::new(File::create(&args.output)?);
    tam::write_program(&mut out, &object.code)?;

    println!(
        "Successfully compiled {} to {} ({} instructions)",
        args.input,
        args.output,
        object.code.len()
    );
    Ok(())
}
