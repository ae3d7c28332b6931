use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotFormat {
    Png,
    Jpeg,
    Gif,
    Svg,
    Unknown,
}

impl PlotFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Gif => "GIF",
            Self::Svg => "SVG",
            Self::Unknown => "unknown",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Gif => "gif",
            Self::Svg => "svg",
            Self::Unknown => "bin",
        }
    }
}

impl std::fmt::Display for PlotFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// The rendered price plot, kept as opaque bytes.
#[derive(Debug, Clone)]
pub struct PlotImage {
    pub format: PlotFormat,
    pub dimensions: Option<(u32, u32)>,
    pub bytes: Vec<u8>,
    pub path: Option<PathBuf>,
}

impl PlotImage {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        let (format, dimensions) = sniff(&bytes);
        Self {
            format,
            dimensions,
            bytes,
            path: None,
        }
    }

    pub fn size_label(&self) -> String {
        let len = self.bytes.len();
        if len >= 1024 * 1024 {
            format!("{:.1} MiB", len as f64 / (1024.0 * 1024.0))
        } else if len >= 1024 {
            format!("{:.1} KiB", len as f64 / 1024.0)
        } else {
            format!("{} B", len)
        }
    }

    /// Writes the bytes to `dir/plot.<ext>` and remembers the path.
    pub fn save_to(&mut self, dir: &Path) -> std::io::Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("plot.{}", self.format.extension()));
        std::fs::write(&path, &self.bytes)?;
        self.path = Some(path.clone());
        Ok(path)
    }
}

pub fn sniff(bytes: &[u8]) -> (PlotFormat, Option<(u32, u32)>) {
    if bytes.starts_with(PNG_SIGNATURE) {
        // IHDR is always the first chunk: width and height follow the chunk type.
        let dims = match (bytes.get(12..16), bytes.get(16..20), bytes.get(20..24)) {
            (Some(chunk), Some(w), Some(h)) if chunk == b"IHDR" => Some((
                u32::from_be_bytes([w[0], w[1], w[2], w[3]]),
                u32::from_be_bytes([h[0], h[1], h[2], h[3]]),
            )),
            _ => None,
        };
        return (PlotFormat::Png, dims);
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        let dims = bytes.get(6..10).map(|d| {
            (
                u16::from_le_bytes([d[0], d[1]]) as u32,
                u16::from_le_bytes([d[2], d[3]]) as u32,
            )
        });
        return (PlotFormat::Gif, dims);
    }
    if bytes.starts_with(&[0xff, 0xd8, 0xff]) {
        return (PlotFormat::Jpeg, None);
    }
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(256)]);
    let head = head.trim_start();
    if head.starts_with("<svg") || (head.starts_with("<?xml") && head.contains("<svg")) {
        return (PlotFormat::Svg, None);
    }
    (PlotFormat::Unknown, None)
}
