use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use log::info;

use binsight::{Classifier, ClassifierConfig, Corpus};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Waste item description to classify; runs a canned demo set when omitted
    query: Option<String>,

    /// Number of nearest corpus items to show per result
    #[arg(short = 'k', long, default_value_t = 5)]
    neighbors: usize,

    /// Confidence below which the keyword fallback is consulted
    #[arg(short, long, default_value_t = 0.6)]
    threshold: f32,

    /// Print the built-in item catalog and exit
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let corpus = Corpus::builtin();

    if args.list {
        for item in corpus.item_catalog() {
            println!("{}", item);
        }
        return Ok(());
    }

    let start_time = Instant::now();
    info!("Building classifier...");

    let config = ClassifierConfig {
        confidence_threshold: args.threshold,
        neighbor_count: args.neighbors,
        ..ClassifierConfig::default()
    };
    let classifier = Classifier::builder()
        .with_corpus(corpus)
        .with_config(config)
        .build()?;

    let build_time = start_time.elapsed();
    let info = classifier.info();
    info!(
        "Classifier built in {:.2?}: {} examples, {} terms",
        build_time, info.num_examples, info.num_terms
    );

    let queries: Vec<String> = match args.query {
        Some(query) => vec![query],
        None => [
            // Items straight from the corpus
            "banana peel",
            "used battery",
            "plastic bottle",
            // Paraphrases and partial matches
            "used tea leaves",
            "empty paint can",
            "broken glass bottle",
            // Unseen inputs
            "wilted flowers",
            "xyzzy unknown junk",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
    };

    let classify_start = Instant::now();
    for query in &queries {
        process_query(&classifier, query);
    }

    info!(
        "Classified {} queries in {:.2?}",
        queries.len(),
        classify_start.elapsed()
    );
    Ok(())
}

fn process_query(classifier: &Classifier, query: &str) {
    let Some(result) = classifier.classify(query) else {
        println!("\n'{}': no input", query);
        return;
    };

    println!("\nItem: {}", query);
    println!(
        "  Category: {} ({:.1}% confident{})",
        result.category,
        result.confidence * 100.0,
        if result.low_confidence {
            ", low confidence"
        } else {
            ""
        }
    );

    if let Some(fallback) = result.fallback {
        println!("  Keyword rules suggest: {}", fallback);
    }

    let mut distribution: Vec<_> = result.distribution.into_iter().collect();
    distribution.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    println!("  Scores:");
    for (category, probability) in distribution {
        println!("    {}: {:.1}%", category, probability * 100.0);
    }

    if result.neighbors.is_empty() {
        println!("  No similar items in the corpus");
    } else {
        println!("  Similar items:");
        for neighbor in result.neighbors {
            println!(
                "    {:.2}  {} ({})",
                neighbor.similarity, neighbor.text, neighbor.category
            );
        }
    }
}
