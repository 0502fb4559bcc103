//! Font loading and discovery

use femtovg::{Canvas, FontId, renderer::OpenGl};

/// Candidate monospace fonts, first hit wins.
const MONO_PATHS: [&str; 5] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/ubuntu/UbuntuMono-R.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
];

/// Fallbacks for extended coverage (Cyrillic, CJK); all that load are kept.
const FALLBACK_PATHS: [&str; 4] = [
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
];

pub fn load_fonts(canvas: &mut Canvas<OpenGl>) -> Vec<FontId> {
    let mut fonts = Vec::new();

    for path in &MONO_PATHS {
        if let Ok(font) = canvas.add_font(path) {
            fonts.push(font);
            break;
        }
    }

    for path in &FALLBACK_PATHS {
        if let Ok(font) = canvas.add_font(path) {
            fonts.push(font);
        }
    }

    // Last resort: scan for any TTF at all.
    if fonts.is_empty() {
        if let Some(font) = scan_truetype_dir(canvas) {
            fonts.push(font);
        }
    }

    if fonts.is_empty() {
        panic!(
            "No suitable font found! Please install dejavu-fonts, liberation-fonts, or fonts-droid-fallback."
        );
    }

    fonts
}

fn scan_truetype_dir(canvas: &mut Canvas<OpenGl>) -> Option<FontId> {
    let entries = std::fs::read_dir("/usr/share/fonts/truetype").ok()?;
    for entry in entries.flatten() {
        if !entry.path().is_dir() {
            continue;
        }
        let sub_entries = match std::fs::read_dir(entry.path()) {
            Ok(sub) => sub,
            Err(_) => continue,
        };
        for sub_entry in sub_entries.flatten() {
            let path = sub_entry.path();
            if path.extension().map(|e| e == "ttf").unwrap_or(false) {
                if let Ok(font) = canvas.add_font(path) {
                    return Some(font);
                }
            }
        }
    }
    None
}
