use clap::Parser;
use log::info;
use std::time::Instant;
use toxdetect::{ToxicityDetector, ToxicityScore};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Text to analyze; a few sample texts run when omitted
    text: Option<String>,
}

const SAMPLE_TEXTS: &[&str] = &[
    "Have a wonderful day!",
    "You are an absolute disgrace and everyone knows it.",
    "The meeting got moved to Thursday afternoon.",
];

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    info!("=== Building toxicity detector ===");
    let start = Instant::now();
    let detector = ToxicityDetector::new()?;
    let detector_info = detector.info();
    info!(
        "detector ready in {:.2?} with {} labels",
        start.elapsed(),
        detector_info.num_labels
    );

    match args.text {
        Some(text) => {
            report(&detector.analyze(&text)?, &text);
        }
        None => {
            for text in SAMPLE_TEXTS {
                report(&detector.analyze(text)?, text);
            }
        }
    }

    info!("total time: {:.2?}", start.elapsed());
    Ok(())
}

fn report(score: &ToxicityScore, text: &str) {
    let mut ranked: Vec<_> = score.scores().to_vec();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!("\nInput: {text}");
    println!("Scores (sorted):");
    for (label, probability) in ranked {
        println!("  {label}: {:.1}%", probability * 100.0);
    }
}
