use anyhow::{anyhow, Result};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::log;

const TESSDATA_REPO: &str = "https://github.com/tesseract-ocr/tessdata/raw/main";

/// Trained data files the pipeline needs: Latin-script English plus
/// Devanagari Hindi for the bilingual fallback pass.
const REQUIRED_LANGS: [&str; 2] = ["eng", "hin"];

pub struct TesseractPaths {
    pub executable: PathBuf,
    pub tessdata: PathBuf,
}

/// Returns the directory for storing managed Tesseract data
pub fn get_tesseract_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("reportslelo")
        .join("tesseract")
}

/// Ensures Tesseract and the required trained data are available.
/// Downloads missing traineddata files into the managed directory.
pub fn ensure_tesseract() -> Result<TesseractPaths> {
    let executable = find_tesseract_executable()?;

    let managed_tessdata = get_tesseract_dir().join("tessdata");
    let tessdata = match find_tessdata_dir() {
        Ok(dir) => dir,
        Err(_) => {
            fs::create_dir_all(&managed_tessdata)?;
            for lang in REQUIRED_LANGS {
                let target = managed_tessdata.join(format!("{}.traineddata", lang));
                if !target.exists() {
                    download_traineddata(lang, &target)?;
                }
            }
            managed_tessdata
        }
    };

    log(&format!(
        "Tesseract ready: {} (tessdata: {})",
        executable.display(),
        tessdata.display()
    ));

    Ok(TesseractPaths {
        executable,
        tessdata,
    })
}

/// Downloads one traineddata file from the upstream tessdata repository.
fn download_traineddata(lang: &str, target: &PathBuf) -> Result<()> {
    let url = format!("{}/{}.traineddata", TESSDATA_REPO, lang);
    log(&format!("Downloading {}.traineddata...", lang));

    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(300))
        .build()?;

    let response = client
        .get(&url)
        .header("User-Agent", "reportslelo")
        .send()?;

    if !response.status().is_success() {
        return Err(anyhow!(
            "Failed to download {}.traineddata: HTTP {}",
            lang,
            response.status()
        ));
    }

    let bytes = response.bytes()?;
    let mut file = fs::File::create(target)?;
    file.write_all(&bytes)?;

    log(&format!(
        "Downloaded {}.traineddata ({} bytes)",
        lang,
        bytes.len()
    ));

    Ok(())
}

/// Finds the Tesseract executable: managed dir first, then PATH, then common
/// install locations.
pub fn find_tesseract_executable() -> Result<PathBuf> {
    let exe_name = if cfg!(windows) { "tesseract.exe" } else { "tesseract" };
    let local_exe = get_tesseract_dir().join(exe_name);
    if local_exe.exists() {
        return Ok(local_exe);
    }

    // Check PATH
    if let Ok(output) = std::process::Command::new("tesseract")
        .arg("--version")
        .output()
    {
        if output.status.success() {
            return Ok(PathBuf::from("tesseract"));
        }
    }

    let common_paths = [
        "/usr/bin/tesseract",
        "/usr/local/bin/tesseract",
        "/opt/homebrew/bin/tesseract",
        r"C:\Program Files\Tesseract-OCR\tesseract.exe",
        r"C:\Program Files (x86)\Tesseract-OCR\tesseract.exe",
    ];

    for path in &common_paths {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "Tesseract not found. Please install Tesseract-OCR with the eng and hin language packs."
    ))
}

/// Finds a tessdata directory containing every required traineddata file.
pub fn find_tessdata_dir() -> Result<PathBuf> {
    let has_all = |dir: &PathBuf| {
        REQUIRED_LANGS
            .iter()
            .all(|lang| dir.join(format!("{}.traineddata", lang)).exists())
    };

    let local_tessdata = get_tesseract_dir().join("tessdata");
    if has_all(&local_tessdata) {
        return Ok(local_tessdata);
    }

    let system_paths = [
        "/usr/share/tesseract-ocr/5/tessdata",
        "/usr/share/tesseract-ocr/4.00/tessdata",
        "/usr/share/tessdata",
        "/usr/local/share/tessdata",
        "/opt/homebrew/share/tessdata",
        r"C:\Program Files\Tesseract-OCR\tessdata",
        r"C:\Program Files (x86)\Tesseract-OCR\tessdata",
    ];

    for path in &system_paths {
        let p = PathBuf::from(path);
        if has_all(&p) {
            return Ok(p);
        }
    }

    // Check TESSDATA_PREFIX environment variable
    if let Ok(prefix) = std::env::var("TESSDATA_PREFIX") {
        let p = PathBuf::from(&prefix);
        if has_all(&p) {
            return Ok(p);
        }
        let p = PathBuf::from(&prefix).join("tessdata");
        if has_all(&p) {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "tessdata directory not found. Ensure eng.traineddata and hin.traineddata are available."
    ))
}
