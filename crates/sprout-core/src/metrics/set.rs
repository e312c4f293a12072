use serde::{Deserialize, Serialize};

/// The five growth metrics, in scoring order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricName {
    BoundingBoxArea,
    GreenPixelRatio,
    LeafCount,
    ColorHealthIndex,
    SunlightProxy,
}

impl MetricName {
    pub const ALL: [MetricName; 5] = [
        Self::BoundingBoxArea,
        Self::GreenPixelRatio,
        Self::LeafCount,
        Self::ColorHealthIndex,
        Self::SunlightProxy,
    ];

    /// Snake-case key used in serialized metric sets.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BoundingBoxArea => "bounding_box_area",
            Self::GreenPixelRatio => "green_pixel_ratio",
            Self::LeafCount => "leaf_count",
            Self::ColorHealthIndex => "color_health_index",
            Self::SunlightProxy => "sunlight_proxy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::BoundingBoxArea => "Bounding Box Area",
            Self::GreenPixelRatio => "Green Pixel Ratio",
            Self::LeafCount => "Leaf Count",
            Self::ColorHealthIndex => "Color Health Index",
            Self::SunlightProxy => "Sunlight Proxy",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Self::BoundingBoxArea => "pixels²",
            Self::LeafCount => "leaves",
            Self::GreenPixelRatio | Self::ColorHealthIndex | Self::SunlightProxy => "%",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::BoundingBoxArea => "Total area covered by the plant's bounding rectangle",
            Self::GreenPixelRatio => {
                "Percentage of image pixels classified as healthy green plant material"
            }
            Self::LeafCount => "Number of individual leaves detected on the plant",
            Self::ColorHealthIndex => "Health score based on color vibrancy and saturation",
            Self::SunlightProxy => "Estimated sunlight exposure based on image brightness",
        }
    }

    /// Factor applied when displaying a raw value: ratios become percent.
    pub fn display_scale(self) -> f64 {
        match self {
            Self::GreenPixelRatio | Self::ColorHealthIndex | Self::SunlightProxy => 100.0,
            Self::BoundingBoxArea | Self::LeafCount => 1.0,
        }
    }

    /// Factor applied to raw values in chart series. Areas are plotted in
    /// thousands of pixels so they share an axis with percentages.
    pub fn chart_scale(self) -> f64 {
        match self {
            Self::BoundingBoxArea => 1.0 / 1000.0,
            other => other.display_scale(),
        }
    }
}

impl std::fmt::Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for MetricName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("unknown metric '{s}'"))
    }
}

/// Metrics for one image. The default is the documented all-zero fallback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSet {
    pub bounding_box_area: u64,
    pub green_pixel_ratio: f64,
    pub leaf_count: u32,
    pub color_health_index: f64,
    pub sunlight_proxy: f64,
}

impl MetricSet {
    pub fn get(&self, name: MetricName) -> f64 {
        match name {
            MetricName::BoundingBoxArea => self.bounding_box_area as f64,
            MetricName::GreenPixelRatio => self.green_pixel_ratio,
            MetricName::LeafCount => f64::from(self.leaf_count),
            MetricName::ColorHealthIndex => self.color_health_index,
            MetricName::SunlightProxy => self.sunlight_proxy,
        }
    }

    /// `(name, value)` pairs in scoring order.
    pub fn iter(&self) -> impl Iterator<Item = (MetricName, f64)> + '_ {
        MetricName::ALL.into_iter().map(move |m| (m, self.get(m)))
    }

    pub fn is_all_zero(&self) -> bool {
        self.iter().all(|(_, v)| v == 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_str() {
        for m in MetricName::ALL {
            assert_eq!(m.as_str().parse::<MetricName>().unwrap(), m);
        }
        assert!("height".parse::<MetricName>().is_err());
    }

    #[test]
    fn default_set_is_all_zero() {
        assert!(MetricSet::default().is_all_zero());
    }

    #[test]
    fn get_widens_integer_metrics() {
        let set = MetricSet {
            bounding_box_area: 1200,
            leaf_count: 3,
            ..Default::default()
        };
        assert_eq!(set.get(MetricName::BoundingBoxArea), 1200.0);
        assert_eq!(set.get(MetricName::LeafCount), 3.0);
    }
}
