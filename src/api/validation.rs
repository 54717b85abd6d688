use crate::error::{ChartError, ChartResult};
use crate::render::Color;

use super::{AxisConfig, DataItem, StyleConfig};

/// Strict style check used when a host replaces the style wholesale.
pub(super) fn validate_style(style: StyleConfig) -> ChartResult<StyleConfig> {
    if !style.canvas.is_valid() {
        return Err(ChartError::InvalidViewport {
            width: style.canvas.width,
            height: style.canvas.height,
        });
    }
    unit("gap ratio", style.gap_ratio)?;
    unit("opacity", style.opacity)?;
    non_negative("corner radius", style.corner_radius)?;
    non_negative("border width", style.border_width)?;
    positive("error bar width", style.error_bar_width)?;
    positive("value label font size", style.value_label_font_size)?;
    positive("title font size", style.title_font_size)?;
    positive("export scale", style.export.scale)?;
    for (name, side) in [
        ("top", style.padding.top),
        ("right", style.padding.right),
        ("bottom", style.padding.bottom),
        ("left", style.padding.left),
    ] {
        if !side.is_finite() || side < 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name} padding must be finite and >= 0"
            )));
        }
    }
    if !(2..=20).contains(&style.tick_count) {
        return Err(ChartError::InvalidData(
            "tick count must be between 2 and 20".to_owned(),
        ));
    }
    for hex in [
        &style.border_color,
        &style.error_bar_color,
        &style.background_color,
        &style.text_color,
        &style.axis_color,
        &style.grid_color,
    ] {
        Color::from_hex(hex)?;
    }
    validate_axis("x", &style.x_axis)?;
    validate_axis("y", &style.y_axis)?;
    Ok(style)
}

fn validate_axis(name: &str, axis: &AxisConfig) -> ChartResult<()> {
    for (field, value) in [
        ("title font size", axis.title_font_size),
        ("tick font size", axis.tick_font_size),
    ] {
        if !value.is_finite() || value <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name}-axis {field} must be finite and > 0"
            )));
        }
    }
    if let Some(step) = axis.tick_step.explicit() {
        if step <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "{name}-axis tick step must be > 0"
            )));
        }
    }
    Ok(())
}

/// Checks the invariants a stored item must satisfy to render as-is.
pub fn validate_item(item: &DataItem) -> ChartResult<()> {
    if !item.value.is_finite() {
        return Err(ChartError::InvalidData(format!(
            "item {} value must be finite",
            item.id
        )));
    }
    if !item.error.is_finite() || item.error < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "item {} error must be finite and >= 0",
            item.id
        )));
    }
    unit("item opacity", item.opacity)?;
    non_negative("item border width", item.border_width)?;
    unit("item pattern opacity", item.pattern_opacity)?;
    Color::from_hex(&item.fill_color)?;
    Color::from_hex(&item.border_color)?;
    Ok(())
}

fn unit(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and in [0, 1]"
        )));
    }
    Ok(())
}

fn non_negative(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and >= 0"
        )));
    }
    Ok(())
}

fn positive(name: &str, value: f64) -> ChartResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ChartError::InvalidData(format!(
            "{name} must be finite and > 0"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ItemId;
    use crate::core::AxisBound;

    #[test]
    fn default_style_is_valid() {
        validate_style(StyleConfig::default()).expect("defaults validate");
    }

    #[test]
    fn bad_style_fields_are_rejected() {
        let style = StyleConfig {
            gap_ratio: 1.5,
            ..StyleConfig::default()
        };
        assert!(validate_style(style).is_err());

        let mut style = StyleConfig::default();
        style.y_axis.tick_step = AxisBound::Value(-1.0);
        assert!(validate_style(style).is_err());

        let style = StyleConfig {
            grid_color: "nope".to_owned(),
            ..StyleConfig::default()
        };
        assert!(validate_style(style).is_err());
    }

    #[test]
    fn items_with_negative_error_are_rejected() {
        let item = DataItem::new(ItemId(1), "a", 1.0).with_error(-1.0);
        assert!(validate_item(&item).is_err());
        validate_item(&DataItem::new(ItemId(2), "", 1.0)).expect("empty label is allowed");
    }
}
