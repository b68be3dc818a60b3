//! Tile naming helpers.
//!
//! A tile is addressed by integer grid coordinates. Its on-disk directory
//! name is `{x}_{y}` (with a zoom level prefixing pyramid tiles), and the
//! raw input file keeps whatever name the tile URL ends with.

/// Directory name for a tile at coordinates `(x, y)`.
pub fn tile_dir_name(x: i32, y: i32) -> String {
    format!("{x}_{y}")
}

/// Directory name for a pyramid tile at coordinates `(x, y)` and zoom `z`.
pub fn pyramid_tile_dir_name(x: i32, y: i32, z: i32) -> String {
    format!("{x}_{y}_{z}")
}

/// Extract a filename from a URL by taking the last path segment.
///
/// Strips query parameters and fragments. Falls back to `"download"` if
/// no meaningful segment is found.
pub fn filename_from_url(url: &str) -> String {
    let clean = url.split('?').next().unwrap_or(url);
    let clean = clean.split('#').next().unwrap_or(clean);

    // Strip scheme and domain so a bare host never becomes a filename.
    let path = if let Some(rest) = clean
        .strip_prefix("https://")
        .or_else(|| clean.strip_prefix("http://"))
    {
        rest.find('/').map(|i| &rest[i..]).unwrap_or("")
    } else {
        clean
    };

    path.rsplit('/')
        .find(|s| !s.is_empty())
        .unwrap_or("download")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_dir_name_joins_coordinates() {
        assert_eq!(tile_dir_name(42, 7), "42_7");
        assert_eq!(tile_dir_name(-3, 0), "-3_0");
    }

    #[test]
    fn pyramid_tile_dir_name_includes_zoom() {
        assert_eq!(pyramid_tile_dir_name(1, 2, 9), "1_2_9");
    }

    #[test]
    fn filename_from_url_takes_last_segment() {
        assert_eq!(
            filename_from_url("https://example.com/tiles/42_7.bin"),
            "42_7.bin"
        );
    }

    #[test]
    fn filename_from_url_strips_query_and_fragment() {
        assert_eq!(
            filename_from_url("https://example.com/tiles/42_7.bin?sig=abc#part"),
            "42_7.bin"
        );
    }

    #[test]
    fn filename_from_url_ignores_trailing_slash() {
        assert_eq!(
            filename_from_url("https://example.com/tiles/42_7.bin/"),
            "42_7.bin"
        );
    }

    #[test]
    fn filename_from_url_falls_back_for_bare_host() {
        assert_eq!(filename_from_url("https://example.com"), "download");
        assert_eq!(filename_from_url("https://example.com/"), "download");
    }
}
