use serde::Serialize;

use crate::symbology::{Color, color_for};

/// Depth thresholds (km) shown in the legend, ascending.
pub const DEPTH_THRESHOLDS: [f64; 6] = [5.0, 20.0, 40.0, 50.0, 60.0, 70.0];

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    pub threshold: f64,
    pub upper: Option<f64>,
    pub label: String,
    pub swatch: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub title: String,
    pub position: LegendPosition,
    pub entries: Vec<LegendEntry>,
}

impl Legend {
    /// Depth legend anchored bottom-right.
    ///
    /// Each swatch is sampled one km past its threshold, so it shows the
    /// colour of the bucket the label starts.
    pub fn depths() -> Self {
        let entries = DEPTH_THRESHOLDS
            .iter()
            .enumerate()
            .map(|(i, &threshold)| {
                let upper = DEPTH_THRESHOLDS.get(i + 1).copied();
                let label = match upper {
                    Some(upper) => format!("{threshold}\u{2013}{upper}"),
                    None => format!("{threshold}+"),
                };
                LegendEntry {
                    threshold,
                    upper,
                    label,
                    swatch: color_for(threshold + 1.0),
                }
            })
            .collect();

        Self {
            title: "Depths".to_string(),
            position: LegendPosition::BottomRight,
            entries,
        }
    }

    /// Markup for the legend control body.
    pub fn to_html(&self) -> String {
        let mut html = format!("<h3 style='text-align: center'>{}</h3>", self.title);
        for entry in &self.entries {
            html.push_str(&format!(
                "<i style=\"background:{}\"></i> {}",
                entry.swatch, entry.threshold
            ));
            match entry.upper {
                Some(upper) => html.push_str(&format!("&ndash;{upper}<br>")),
                None => html.push('+'),
            }
        }
        html
    }
}
