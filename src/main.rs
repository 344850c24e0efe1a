//! Reportslelo
//!
//! Turns a photographed lab-report image into extracted patient details and a
//! short Hindi summary message ready to send to the patient. The upload UI is
//! a separate layer; this binary takes an image path and prints the three
//! pipeline outputs: recognized text, extracted fields, and the final message.

mod config;
mod ocr;
mod paths;
mod pipeline;
mod report;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;

/// Logs a message to both console and log file with timestamp.
pub fn log(msg: &str) {
    let timestamp = Local::now().format("%H:%M:%S%.3f");
    let line = format!("[{}] {}\n", timestamp, msg);
    print!("{}", line);
    let log_path = paths::get_logs_dir().join("reportslelo.log");
    if let Ok(mut file) = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        let _ = file.write_all(line.as_bytes());
    }
}

fn main() -> Result<()> {
    // Set up panic hook to log panics
    std::panic::set_hook(Box::new(|panic_info| {
        let msg = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };
        let location = panic_info
            .location()
            .map(|loc| format!(" at {}:{}:{}", loc.file(), loc.line(), loc.column()))
            .unwrap_or_default();
        eprintln!("[PANIC]{} {}", location, msg);
    }));

    paths::ensure_directories()?;
    config::init_config();
    let cfg = config::get_config();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Debug mode: skip OCR and run the text tail on an already-recognized
    // transcript
    if args.first().map(String::as_str) == Some("--text") {
        let text_path = args
            .get(1)
            .ok_or_else(|| anyhow!("usage: reportslelo --text <transcript.txt>"))?;
        let text = std::fs::read_to_string(text_path)?;
        let (fields, _, message) = pipeline::analyze_text(&text, cfg);

        println!("\n--- Extracted fields ---");
        println!("Name : {}", fields.name);
        println!("Age  : {}", fields.age);
        println!("Phone: {}", fields.phone);
        println!("\n--- मरीज को भेजे जाने वाला मैसेज ---");
        println!("{}", message);
        return Ok(());
    }

    let image_path = args
        .first()
        .cloned()
        .ok_or_else(|| anyhow!("usage: reportslelo <report-image.jpg|png>"))?;

    // Locates Tesseract and the eng/hin language data, downloading the
    // traineddata files on first run
    let engine = ocr::TesseractEngine::new()
        .context("Tesseract setup failed; OCR will not work until it is installed")?;

    log(&format!("Analyzing report image: {}", image_path));
    let bytes = std::fs::read(&image_path)?;
    let analysis = pipeline::analyze_image_bytes(&engine, &bytes, cfg)?;

    println!("\n--- रिपोर्ट से निकाला गया टेक्स्ट ---");
    println!(
        "(language hint: {})",
        analysis.recognized_text.lang.tesseract_arg()
    );
    println!("{}", analysis.recognized_text.text.trim());

    println!("\n--- Extracted fields ---");
    println!("Name : {}", analysis.fields.name);
    println!("Age  : {}", analysis.fields.age);
    println!("Phone: {}", analysis.fields.phone);

    println!("\n--- मरीज को भेजे जाने वाला मैसेज ---");
    println!("{}", analysis.message);

    Ok(())
}
