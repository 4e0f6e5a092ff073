//! # Display Formatting
//!
//! Number formatting for showing calculation results.
//!
//! ```rust
//! use ledwall_core::format::{format_currency, format_resolution};
//!
//! assert_eq!(format_currency(1_200_000.0), "¥1,200,000");
//! assert_eq!(format_resolution(1920, 1080), "1,920 × 1,080 px (2,073,600 pixels)");
//! ```

use crate::units::{Meters, Millimeters};

/// Group the integer part with commas, keeping up to 3 fraction digits.
pub fn format_number(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let text = format!("{:.3}", rounded);
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 && rounded != 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac)
    }
}

/// `width × height` with an optional unit suffix
pub fn format_dimensions(width: f64, height: f64, unit: &str) -> String {
    let base = format!("{} × {}", format_number(width), format_number(height));
    if unit.is_empty() {
        base
    } else {
        format!("{} {}", base, unit)
    }
}

/// Resolution with its total pixel count
pub fn format_resolution(width_px: u64, height_px: u64) -> String {
    let (width, height) = (width_px as f64, height_px as f64);
    format!(
        "{} ({} pixels)",
        format_dimensions(width, height, "px"),
        format_number(width * height)
    )
}

/// Physical size in meters and millimeters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedPhysicalSize {
    pub meters: String,
    pub millimeters: String,
}

/// Physical size as `W × H m` (two decimals) and `W × H mm`
pub fn format_physical_size(width_mm: f64, height_mm: f64) -> FormattedPhysicalSize {
    let width_m: Meters = Millimeters(width_mm).into();
    let height_m: Meters = Millimeters(height_mm).into();
    FormattedPhysicalSize {
        meters: format!("{:.2} × {:.2} m", width_m.0, height_m.0),
        millimeters: format!("{} × {} mm", format_number(width_mm), format_number(height_mm)),
    }
}

/// Area in m² with two decimals
pub fn format_area(area_m2: f64) -> String {
    format!("{:.2} m²", area_m2)
}

/// Distance in meters with one decimal
pub fn format_distance(meters: f64) -> String {
    format!("{:.1} m", meters)
}

/// Amount in yen
pub fn format_currency(yen: f64) -> String {
    format!("¥{}", format_number(yen))
}

/// Pixel density in pixels/m²
pub fn format_pixel_density(density: f64) -> String {
    format!("{} pixels/m²", format_number(density))
}

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Reduced aspect ratio, e.g. `16:9`
pub fn format_aspect_ratio(width: u64, height: u64) -> String {
    let divisor = gcd(width, height);
    if divisor == 0 {
        return "0:0".to_string();
    }
    format!("{}:{}", width / divisor, height / divisor)
}

/// Panel count with its grid, e.g. `12 panels (4 × 3)`
pub fn format_panel_count(total: u64, width: u64, height: u64) -> String {
    format!("{} panels ({} × {})", format_number(total as f64), width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_resolution_huge_does_not_overflow() {
        let text = format_resolution(u64::MAX, u64::MAX);
        assert!(text.ends_with(" pixels)"));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(1_234_567.0), "1,234,567");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(3.14159), "3.142");
        assert_eq!(format_number(-1500.0), "-1,500");
    }

    #[test]
    fn test_format_dimensions() {
        assert_eq!(format_dimensions(2000.0, 1500.0, "mm"), "2,000 × 1,500 mm");
        assert_eq!(format_dimensions(4.0, 3.0, ""), "4 × 3");
    }

    #[test]
    fn test_format_physical_size() {
        let size = format_physical_size(2000.0, 1500.0);
        assert_eq!(size.meters, "2.00 × 1.50 m");
        assert_eq!(size.millimeters, "2,000 × 1,500 mm");
    }

    #[test]
    fn test_simple_formats() {
        assert_eq!(format_area(3.0), "3.00 m²");
        assert_eq!(format_distance(7.0), "7.0 m");
        assert_eq!(format_pixel_density(160_000.0), "160,000 pixels/m²");
        assert_eq!(format_panel_count(12, 4, 3), "12 panels (4 × 3)");
    }

    #[test]
    fn test_format_aspect_ratio() {
        assert_eq!(format_aspect_ratio(1920, 1080), "16:9");
        assert_eq!(format_aspect_ratio(800, 600), "4:3");
        assert_eq!(format_aspect_ratio(500, 500), "1:1");
        assert_eq!(format_aspect_ratio(0, 0), "0:0");
    }
}
