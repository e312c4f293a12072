use serde::{Deserialize, Serialize};

use crate::color::rgb_to_hsv;
use crate::consts::{
    BRIGHTNESS_STD_SPAN, CLEAR_SKY_EXPONENT, OVEREXPOSED_VALUE, OVEREXPOSURE_PENALTY_CAP,
    OVEREXPOSURE_PENALTY_SCALE, SHADOW_CUTOFFS, SHADOW_WEIGHTS, SUNLIGHT_IMAGE_WEIGHTS,
    SUNLIGHT_WEATHER_WEIGHTS, UVI_FULL_SUN, WEATHER_CLEAR_BOOST, WEATHER_OVERCAST_PENALTY,
    WEATHER_PARTLY_CLOUDY_BOOST, WEATHER_PRECIPITATION_PENALTY,
};
use crate::frame::{Mask, RgbFrame};

use super::config::WeatherSnapshot;

/// Intermediate values behind a sunlight proxy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SunlightBreakdown {
    /// Mean plant brightness, normalized to [0, 1].
    pub mean_brightness: f64,
    /// Share of plant pixels below each shadow cutoff, deepest first.
    pub shadow_densities: [f64; 3],
    pub shadow_score: f64,
    pub uniformity: f64,
    /// Mean plant saturation, normalized to [0, 1].
    pub mean_saturation: f64,
    pub overexposed_fraction: f64,
    pub overexposure_penalty: f64,
    pub image_score: f64,
    pub clear_sky_factor: f64,
    pub uv_factor: f64,
    pub description_modifier: f64,
    pub weather_score: f64,
    pub score: f64,
    /// Set when the proxy could not be computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Sunlight exposure proxy of the plant pixels of `blurred`, blended with
/// `weather`.
///
/// `alpha` is the image-side share. An empty mask scores 0 and sets the
/// breakdown's `error` marker.
pub fn sunlight_proxy(blurred: &RgbFrame, mask: &Mask, weather: &WeatherSnapshot, alpha: f64) -> SunlightBreakdown {
    let mut values = Vec::new();
    let mut sat_sum = 0.0f64;
    for ((row, col), _) in mask.indexed_iter().filter(|(_, v)| **v) {
        let [_, s, v] = rgb_to_hsv(blurred.pixel(row, col));
        values.push(v);
        sat_sum += f64::from(s);
    }

    if values.is_empty() {
        return SunlightBreakdown {
            error: Some("empty plant region in mask".into()),
            ..Default::default()
        };
    }

    let n = values.len() as f64;
    let mean_value = values.iter().map(|&v| f64::from(v)).sum::<f64>() / n;
    let variance = values
        .iter()
        .map(|&v| (f64::from(v) - mean_value).powi(2))
        .sum::<f64>()
        / n;

    let mean_brightness = mean_value / 255.0;
    let mean_saturation = sat_sum / n / 255.0;

    let mut shadow_densities = [0.0f64; 3];
    for (density, cutoff) in shadow_densities.iter_mut().zip(SHADOW_CUTOFFS) {
        let limit = cutoff * 255.0;
        *density = values.iter().filter(|&&v| f64::from(v) < limit).count() as f64 / n;
    }
    let weighted_shadow: f64 = shadow_densities.iter().zip(SHADOW_WEIGHTS).map(|(d, w)| d * w).sum();
    let shadow_score = clamp_unit(1.0 - weighted_shadow);
    let uniformity = clamp_unit(1.0 - variance.sqrt() / BRIGHTNESS_STD_SPAN);

    let overexposed_fraction = values.iter().filter(|&&v| v >= OVEREXPOSED_VALUE).count() as f64 / n;
    let overexposure_penalty = (OVEREXPOSURE_PENALTY_SCALE * overexposed_fraction).min(OVEREXPOSURE_PENALTY_CAP);

    let [w_bright, w_shadow, w_uniform, w_sat] = SUNLIGHT_IMAGE_WEIGHTS;
    let image_score = clamp_unit(
        w_bright * mean_brightness + w_shadow * shadow_score + w_uniform * uniformity + w_sat * mean_saturation
            - overexposure_penalty,
    );

    let clear_sky_factor = clear_sky_factor(weather.clouds);
    let uv_factor = (weather.uvi.max(0.0) / UVI_FULL_SUN).min(1.0);
    let description_modifier = description_modifier(&weather.description);
    let [w_sky, w_uv] = SUNLIGHT_WEATHER_WEIGHTS;
    let weather_score = clamp_unit(w_sky * clear_sky_factor + w_uv * uv_factor + description_modifier);

    let alpha = alpha.clamp(0.0, 1.0);
    let score = clamp_unit(alpha * image_score + (1.0 - alpha) * weather_score);

    SunlightBreakdown {
        mean_brightness,
        shadow_densities,
        shadow_score,
        uniformity,
        mean_saturation,
        overexposed_fraction,
        overexposure_penalty,
        image_score,
        clear_sky_factor,
        uv_factor,
        description_modifier,
        weather_score,
        score,
        error: None,
    }
}

/// Clear-sky share raised to an exponent below one, so the first clouds to
/// clear count the most.
pub fn clear_sky_factor(clouds: f64) -> f64 {
    let clear = (100.0 - clouds.clamp(0.0, 100.0)) / 100.0;
    clear.powf(CLEAR_SKY_EXPONENT)
}

/// Score adjustment from a free-text weather description.
pub fn description_modifier(description: &str) -> f64 {
    let d = description.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| d.contains(w));

    if has(&["rain", "storm", "thunder", "drizzle", "snow"]) {
        WEATHER_PRECIPITATION_PENALTY
    } else if has(&["partly", "scattered", "few clouds"]) {
        WEATHER_PARTLY_CLOUDY_BOOST
    } else if has(&["overcast", "cloud"]) {
        WEATHER_OVERCAST_PENALTY
    } else if has(&["clear", "sun"]) {
        WEATHER_CLEAR_BOOST
    } else {
        0.0
    }
}

#[inline]
fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}
