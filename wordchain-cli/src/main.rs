use log::info;

use wordchain_core::io::read_words;
use wordchain_core::model::builder::{Builder, DEFAULT_ORDER};
use wordchain_core::model::generator::DEFAULT_MAX_WORDS;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    // Corpus file to learn from
    let path = args
        .get(1)
        .ok_or("usage: wordchain-cli <corpus> [max_words] [order]")?;

    // Bound on the number of generated words (the walk usually stops on its
    // own when it reaches the end of a learned sequence)
    let max_words: usize = match args.get(2) {
        Some(raw) => raw.parse()?,
        None => DEFAULT_MAX_WORDS,
    };

    // Number of prefix words; higher orders stay closer to the corpus
    let order: usize = match args.get(3) {
        Some(raw) => raw.parse()?,
        None => DEFAULT_ORDER,
    };

    let mut builder = Builder::new(order)?;
    builder.feed_words(read_words(path)?);
    let model = builder.finish();
    info!("learned {} states from {}", model.len(), path);

    let words = model.generate(max_words)?;
    println!("{}", words.join(" "));

    Ok(())
}
