//! Clickable image-map regions and the companion HTML document

use crate::color::Rgba;
use crate::error::{Result, TrackplotError};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapRegion {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub href: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub label: String,
    pub color: Rgba,
}

/// Region → link table filled by glyphs while a panel draws.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageMap {
    pub name: String,
    regions: Vec<MapRegion>,
    legend: Vec<LegendEntry>,
    caption: Option<String>,
}

impl ImageMap {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_region(&mut self, region: MapRegion) {
        self.regions.push(region);
    }

    pub fn regions(&self) -> &[MapRegion] {
        &self.regions
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn add_legend_entry<S: Into<String>>(&mut self, label: S, color: Rgba) {
        self.legend.push(LegendEntry { label: label.into(), color });
    }

    pub fn legend(&self) -> &[LegendEntry] {
        &self.legend
    }

    pub fn set_caption<S: Into<String>>(&mut self, caption: S) {
        self.caption = Some(caption.into());
    }

    pub fn to_html(&self, image_src: &str, width: u32, height: u32) -> String {
        let name = escape_attr(&self.name);
        let mut html = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(html, "<!DOCTYPE html>");
        let _ = writeln!(html, "<html>");
        let _ = writeln!(html, "<head><meta charset=\"utf-8\"><title>{}</title></head>", name);
        let _ = writeln!(html, "<body>");
        if let Some(caption) = &self.caption {
            let _ = writeln!(html, "<p class=\"caption\">{}</p>", escape_attr(caption));
        }
        let _ = writeln!(
            html,
            "<img src=\"{}\" width=\"{}\" height=\"{}\" usemap=\"#{}\" alt=\"{}\">",
            escape_attr(image_src),
            width,
            height,
            name,
            name
        );
        let _ = writeln!(html, "<map name=\"{}\">", name);
        for region in &self.regions {
            let _ = writeln!(
                html,
                "  <area shape=\"rect\" coords=\"{},{},{},{}\" href=\"{}\" title=\"{}\" alt=\"{}\">",
                region.left.floor() as i64,
                region.top.floor() as i64,
                region.right.ceil() as i64,
                region.bottom.ceil() as i64,
                escape_attr(&region.href),
                escape_attr(&region.title),
                escape_attr(&region.title)
            );
        }
        let _ = writeln!(html, "</map>");
        if !self.legend.is_empty() {
            let _ = writeln!(html, "<ul class=\"tracks\">");
            for entry in &self.legend {
                let _ = writeln!(
                    html,
                    "  <li><span style=\"color:{}\">&#9632;</span> {}</li>",
                    entry.color.to_hex(),
                    escape_attr(&entry.label)
                );
            }
            let _ = writeln!(html, "</ul>");
        }
        let _ = writeln!(html, "</body>");
        let _ = writeln!(html, "</html>");
        html
    }

    /// Write the HTML document next to `image_path` and return its location.
    pub fn write_companion(&self, image_path: &Path, width: u32, height: u32) -> Result<PathBuf> {
        let html_path = companion_path(image_path);
        let image_src = image_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let html = self.to_html(&image_src, width, height);
        std::fs::write(&html_path, html).map_err(|e| TrackplotError::io(&html_path, e))?;
        log::info!(
            "Wrote image map with {} regions to {}",
            self.regions.len(),
            html_path.display()
        );
        Ok(html_path)
    }
}

/// Same base name as the image, extension replaced by `.html`
pub fn companion_path(image_path: &Path) -> PathBuf {
    image_path.with_extension("html")
}

fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn region(href: &str, title: &str) -> MapRegion {
        MapRegion {
            left: 10.4,
            top: 30.0,
            right: 20.6,
            bottom: 40.0,
            href: href.to_string(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_html_contains_areas_and_image() {
        let mut map = ImageMap::new("figure");
        map.add_region(region("https://example.org/?a=1&b=2", "gene <A>"));
        let html = map.to_html("figure.png", 800, 120);

        assert!(html.contains("<img src=\"figure.png\" width=\"800\" height=\"120\" usemap=\"#figure\""));
        assert!(html.contains("coords=\"10,30,21,40\""));
        assert!(html.contains("href=\"https://example.org/?a=1&amp;b=2\""));
        assert!(html.contains("title=\"gene &lt;A&gt;\""));
    }

    #[test]
    fn test_legend_rendered_when_present() {
        let mut map = ImageMap::new("m");
        assert!(!map.to_html("m.png", 1, 1).contains("<ul"));
        map.add_legend_entry("SNPs", Rgba::rgb(255, 0, 0));
        let html = map.to_html("m.png", 1, 1);
        assert!(html.contains("color:#ff0000"));
        assert!(html.contains("SNPs"));
    }

    #[test]
    fn test_companion_path() {
        assert_eq!(
            companion_path(Path::new("out/plot.png")),
            PathBuf::from("out/plot.html")
        );
        assert_eq!(companion_path(Path::new("plot")), PathBuf::from("plot.html"));
    }

    #[test]
    fn test_write_companion() {
        let dir = tempfile::tempdir().unwrap();
        let image_path = dir.path().join("map.png");
        let mut map = ImageMap::new("map");
        map.add_region(region("#", "x"));
        let html_path = map.write_companion(&image_path, 100, 50).unwrap();
        let html = std::fs::read_to_string(html_path).unwrap();
        assert!(html.contains("src=\"map.png\""));
        assert_eq!(html.matches("<area").count(), 1);
    }
}
