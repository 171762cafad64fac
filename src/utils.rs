use indicatif::{ProgressBar, ProgressStyle};
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Sniff the container format of a frame from its magic bytes.
pub fn infer_image_format(image_bytes: &[u8]) -> Option<&'static str> {
    if image_bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("jpg")
    } else if image_bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        Some("png")
    } else if image_bytes.starts_with(b"BM") {
        Some("bmp")
    } else if image_bytes.starts_with(b"GIF8") {
        Some("gif")
    } else if image_bytes.len() >= 12
        && &image_bytes[..4] == b"RIFF"
        && &image_bytes[8..12] == b"WEBP"
    {
        Some("webp")
    } else {
        None
    }
}

/// Compare file names so that runs of digits are ordered numerically.
///
/// `frame_2.jpg` sorts before `frame_10.jpg`; zero-padded names keep their
/// plain lexicographic order.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        match (a_chars.peek().copied(), b_chars.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let x_run = take_digits(&mut a_chars);
                let y_run = take_digits(&mut b_chars);
                let x_trimmed = x_run.trim_start_matches('0');
                let y_trimmed = y_run.trim_start_matches('0');
                let ordering = x_trimmed
                    .len()
                    .cmp(&y_trimmed.len())
                    .then_with(|| x_trimmed.cmp(y_trimmed))
                    // Equal values: fewer leading zeros first, for a total order.
                    .then_with(|| x_run.len().cmp(&y_run.len()));
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(x), Some(y)) => {
                if x != y {
                    return x.cmp(&y);
                }
                a_chars.next();
                b_chars.next();
            }
        }
    }
}

fn take_digits(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

/// Create a progress bar with the given length and label
pub fn create_progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(&format!(
                concat!(
                    "{{spinner:.green}} [{}] [{{elapsed_precise}}] ",
                    "[{{bar:40.cyan/blue}}] {{pos}}/{{len}} ({{eta}})"
                ),
                label
            ))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb
}

/// Make sure the directory that will hold `path` exists.
pub fn ensure_parent_directory(path: &Path) -> std::io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            log::info!("Creating output directory {:?}", parent);
            fs::create_dir_all(parent)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_image_format() {
        assert_eq!(infer_image_format(&[0xFF, 0xD8, 0xFF, 0xE0]), Some("jpg"));
        assert_eq!(infer_image_format(&[0x89, b'P', b'N', b'G']), Some("png"));
        assert_eq!(infer_image_format(b"BM\x00\x00"), Some("bmp"));
        assert_eq!(infer_image_format(b"GIF89a"), Some("gif"));
        assert_eq!(infer_image_format(b"RIFF\x00\x00\x00\x00WEBPVP8 "), Some("webp"));
        assert_eq!(infer_image_format(&[0x00, 0x00, 0x00]), None);
        assert_eq!(infer_image_format(&[]), None);
    }

    #[test]
    fn test_natural_cmp() {
        let mut names = vec!["frame_10.jpg", "frame_2.jpg", "frame_1.jpg", "frame_0100.jpg"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(
            names,
            vec!["frame_1.jpg", "frame_2.jpg", "frame_10.jpg", "frame_0100.jpg"]
        );

        let mut padded = vec!["frame_0003.jpg", "frame_0001.jpg", "frame_0002.jpg"];
        padded.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(padded, vec!["frame_0001.jpg", "frame_0002.jpg", "frame_0003.jpg"]);

        assert_eq!(natural_cmp("a", "a"), Ordering::Equal);
        assert_eq!(natural_cmp("frame_1", "frame_01"), Ordering::Less);
        assert_eq!(natural_cmp("img", "img_1"), Ordering::Less);
    }

    #[test]
    fn test_create_progress_bar() {
        let pb = create_progress_bar(3, "Frames");
        assert_eq!(pb.length(), Some(3));
        pb.inc(2);
        assert_eq!(pb.position(), 2);
    }

    #[test]
    fn test_ensure_parent_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let target = temp_dir.path().join("datasets/nested/out.data");
        ensure_parent_directory(&target).unwrap();
        assert!(target.parent().unwrap().is_dir());
        ensure_parent_directory(Path::new("out.data")).unwrap();
    }
}
