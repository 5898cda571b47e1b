//! Plain-text listing of an artwork batch, used by `--list`

use std::fmt::Write;

use crate::data::Artwork;

/// Formats one block per artwork: id and title, artist and date, image URL
pub fn format_listing(records: &[Artwork]) -> String {
    if records.is_empty() {
        return "No artworks in this batch.\n".to_string();
    }

    let mut out = String::new();
    for art in records {
        let _ = writeln!(out, "{:>8}  {}", art.id, art.display_title());
        let _ = writeln!(
            out,
            "          {} | {}",
            art.display_artist().replace('\n', ", "),
            art.display_date()
        );
        let image = art.image_url().unwrap_or_else(|| "(no image)".to_string());
        let _ = writeln!(out, "          {}", image);
    }
    out
}
