//! # convopack CLI
//!
//! Command-line interface for the convopack library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;

use convopack::ConvopackError;
use convopack::cli::{Args, OutputFormat};
use convopack::config::{DatasetConfig, MessengerConfig};
use convopack::core::{Dataset, make_training_examples, make_training_examples_with_progress};
use convopack::extractors::MessengerExtractor;
use convopack::progress::stderr_progress;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), ConvopackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let output_path = adjust_output_extension(&args.output, args.format);

    println!("📦 convopack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    println!("💾 Output:  {}", output_path);
    println!("📄 Format:  {}", args.format);
    println!();

    // Step 1: Extract conversations from the Messenger export
    println!("⏳ Extracting Messenger conversations...");
    let extract_start = Instant::now();

    let mut messenger_config = MessengerConfig::new()
        .with_min_messages(args.min_messages)
        .with_fix_encoding(!args.no_fix_encoding);
    if let Some(max) = args.max_participants {
        messenger_config = messenger_config.with_max_participants(max);
    }

    let extractor = MessengerExtractor::with_config(&args.input, messenger_config);
    let conversations = extractor.extract()?;
    let message_count: usize = conversations.iter().map(Vec::len).sum();
    println!(
        "   Found {} conversations, {} messages ({:.2}s)",
        conversations.len(),
        message_count,
        extract_start.elapsed().as_secs_f64()
    );

    // Step 2: Build the (context, response) dataset
    let mut dataset_config = DatasetConfig::new()
        .with_filter_hyperlinks(args.filter_hyperlinks)
        .with_combine_contexts(!args.no_combine)
        .with_seq_tags(!args.no_tags);
    if let Some(max) = args.max_context_len {
        dataset_config = dataset_config.with_max_context_length(max);
    }
    if let Some(max) = args.max_message_len {
        dataset_config = dataset_config.with_max_message_length(max);
    }

    println!("🌳 Building conversation tree and extracting pairs...");
    let build_start = Instant::now();
    let dataset = if args.quiet {
        make_training_examples(&conversations, &dataset_config)
    } else {
        let progress = stderr_progress();
        make_training_examples_with_progress(&conversations, &dataset_config, &progress)
    };
    println!(
        "   Extracted {} examples ({:.2}s)",
        dataset.len(),
        build_start.elapsed().as_secs_f64()
    );

    // Step 3: Write output in the selected format
    println!("💾 Writing {}...", args.format);
    let write_start = Instant::now();
    write_dataset(&dataset, &output_path, args.format)?;
    println!("   Written in {:.2}s", write_start.elapsed().as_secs_f64());

    println!();
    println!("✅ Done! Output saved to {}", output_path);

    println!();
    println!("📊 Summary:");
    println!("   Conversations: {}", conversations.len());
    println!("   Messages:      {}", message_count);
    println!("   Examples:      {}", dataset.len());

    println!();
    println!("⚡ Performance:");
    println!(
        "   Total time:  {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn write_dataset(
    dataset: &Dataset,
    output_path: &str,
    format: OutputFormat,
) -> Result<(), ConvopackError> {
    match format {
        OutputFormat::Json => convopack::core::write_json(dataset, output_path),
        OutputFormat::Jsonl => convopack::core::write_jsonl(dataset, output_path),
        OutputFormat::Csv => convopack::core::write_csv(dataset, output_path),
    }
}

/// Adjusts output file extension based on format if using default output.
fn adjust_output_extension(output: &str, format: OutputFormat) -> String {
    if output != "training_pairs.json" {
        return output.to_string();
    }
    format!("training_pairs.{}", format.extension())
}
