use bandread::{format_reading, BandReader, ReadConfig};
use std::error::Error;
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image> [config.json] [out.json]", args[0]);
        std::process::exit(2);
    }

    let config = match args.get(2) {
        Some(path) => ReadConfig::from_json_file(Path::new(path))?,
        None => ReadConfig::default(),
    };
    let reader = BandReader::with_config(config);
    let reading = reader.read_path(Path::new(&args[1]))?;

    println!("Bands: {}", reading.band_names().join("-"));
    match format_reading(&reading) {
        Some(label) => println!("Value: {label}"),
        None => println!("Value: undecided"),
    }

    if let Some(out_path) = args.get(3) {
        let json = serde_json::to_string_pretty(&reading)?;
        std::fs::write(out_path, json)?;
        println!("Wrote {out_path}");
    }
    Ok(())
}
