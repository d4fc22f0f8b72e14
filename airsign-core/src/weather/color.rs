//! Temperature to label color

use airsign_display::Rgb;

/// Color for a temperature in °C
pub fn temp_color(celsius: f32) -> Rgb {
    let packed = if celsius <= -10.0 {
        0x2068B0
    } else if celsius < -0.05 {
        0x5050F8
    } else if celsius < 0.05 {
        0xF8F8F8
    } else if celsius < 10.0 {
        0xFFE020
    } else if celsius < 20.0 {
        0xFF9000
    } else if celsius < 30.0 {
        0xFF4000
    } else {
        0xFF0000
    };
    Rgb::from_u32(packed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints() {
        assert_eq!(temp_color(-10.0).to_u32(), 0x2068B0);
        assert_eq!(temp_color(-25.0).to_u32(), 0x2068B0);
        assert_eq!(temp_color(-9.9).to_u32(), 0x5050F8);
        assert_eq!(temp_color(-0.05).to_u32(), 0xF8F8F8);
        assert_eq!(temp_color(0.0).to_u32(), 0xF8F8F8);
        assert_eq!(temp_color(0.05).to_u32(), 0xFFE020);
        assert_eq!(temp_color(10.0).to_u32(), 0xFF9000);
        assert_eq!(temp_color(20.0).to_u32(), 0xFF4000);
        assert_eq!(temp_color(29.9).to_u32(), 0xFF4000);
        assert_eq!(temp_color(30.0).to_u32(), 0xFF0000);
    }
}
