use canvas_charts::core::{RangeOverride, XLabelVisibility};
use canvas_charts::element::PointHitMode;
use canvas_charts::render::Color;
use canvas_charts::{ChartConfig, ChartError, ConfigOverrides, resolve_config};

#[test]
fn defaults_match_the_global_chart_options() {
    let config = ChartConfig::default();

    assert!(config.show_scale);
    assert_eq!(config.scale_font_size, 12.0);
    assert_eq!(config.scale_font_color, Color::from_rgba8(0x66, 0x66, 0x66, 1.0));
    assert!(config.scale_integers_only);
    assert!(!config.scale_begin_at_zero);
    assert_eq!(config.scale_label.as_str(), "{value}");
    assert_eq!(config.show_x_labels, XLabelVisibility::All);
    assert!(config.validate().is_ok());
}

#[test]
fn later_layers_win_and_none_keeps_lower_values() {
    let user = ConfigOverrides {
        scale_font_size: Some(14.0),
        point_dot_radius: Some(6.0),
        ..ConfigOverrides::default()
    };

    let config = resolve_config(&ChartConfig::default(), &[ConfigOverrides::line_chart(), user])
        .expect("resolve");

    assert_eq!(config.scale_font_size, 14.0);
    assert_eq!(config.point_dot_radius, 6.0);
    assert_eq!(config.point_hit_detection_radius, 10.0);
    assert_eq!(config.scale_font_style, "normal");
}

#[test]
fn radar_layer_hides_value_labels_and_begins_at_zero() {
    let config = resolve_config(&ChartConfig::default(), &[ConfigOverrides::radar_chart()])
        .expect("resolve");

    assert!(!config.scale_show_labels);
    assert!(config.scale_begin_at_zero);
    assert_eq!(config.point_dot_radius, 3.0);

    let options = config.radial_scale_options();
    assert!(!options.show_labels);
    assert!(options.range_fit.begin_at_zero);
    assert!(!options.line_arc);
}

#[test]
fn empty_layer_list_returns_the_base() {
    let base = ChartConfig::default().with_scale_font_size(18.0);
    let config = resolve_config(&base, &[]).expect("resolve");
    assert_eq!(config, base);
}

#[test]
fn scale_override_layer_is_applied() {
    let fixed = RangeOverride {
        steps: 4,
        step_width: 10.0,
        start_value: 0.0,
    };
    let layer = ConfigOverrides {
        scale_override: Some(fixed),
        ..ConfigOverrides::default()
    };

    let config = resolve_config(&ChartConfig::default(), &[layer]).expect("resolve");

    assert_eq!(config.scale_override, Some(fixed));
    assert_eq!(config.linear_scale_options().range_override, Some(fixed));
}

#[test]
fn invalid_layers_are_rejected() {
    let negative_width = ConfigOverrides {
        scale_line_width: Some(-1.0),
        ..ConfigOverrides::default()
    };
    assert!(matches!(
        resolve_config(&ChartConfig::default(), &[negative_width]),
        Err(ChartError::InvalidData(_))
    ));

    let zero_font = ChartConfig::default().with_scale_font_size(0.0);
    assert!(zero_font.validate().is_err());

    let bad_override = ChartConfig::default().with_scale_override(RangeOverride {
        steps: 0,
        step_width: 5.0,
        start_value: 0.0,
    });
    assert!(bad_override.validate().is_err());
}

#[test]
fn hidden_grid_lines_become_transparent() {
    let config = resolve_config(
        &ChartConfig::default(),
        &[ConfigOverrides {
            scale_show_grid_lines: Some(false),
            ..ConfigOverrides::default()
        }],
    )
    .expect("resolve");

    let options = config.linear_scale_options();
    assert_eq!(options.grid_line_width, 0.0);
    assert_eq!(options.grid_line_color, Color::TRANSPARENT);
}

#[test]
fn hidden_scale_pads_by_point_size() {
    let config = ChartConfig::default().with_show_scale(false);
    let options = config.linear_scale_options();

    assert!(!options.display);
    assert_eq!(
        options.padding,
        config.point_dot_radius + config.point_dot_stroke_width
    );
    assert_eq!(ChartConfig::default().linear_scale_options().padding, 0.0);
}

#[test]
fn radial_options_respect_line_toggles() {
    let config = ChartConfig {
        scale_show_line: false,
        angle_show_line_out: false,
        angle_line_interval: 0,
        ..ChartConfig::default()
    };
    let options = config.radial_scale_options();

    assert_eq!(options.line_width, 0.0);
    assert_eq!(options.angle_line_width, 0.0);
    assert_eq!(options.angle_line_interval, 1);
}

#[test]
fn point_style_carries_dot_options() {
    let config = ChartConfig {
        point_dot: false,
        point_dot_radius: 5.0,
        point_hit_detection_radius: 12.0,
        ..ChartConfig::default()
    };
    let style = config.point_style(PointHitMode::Horizontal);

    assert!(!style.display);
    assert_eq!(style.radius, 5.0);
    assert_eq!(style.hit_detection_radius, 12.0);
    assert_eq!(style.hit_mode, PointHitMode::Horizontal);
}

#[test]
fn overrides_parse_from_sparse_json() {
    let layer = ConfigOverrides::from_json_str(
        r##"{ "scale_font_size": 16, "scale_grid_line_color": "#ff0000", "scale_begin_at_zero": true }"##,
    )
    .expect("parse overrides");

    assert_eq!(layer.scale_font_size, Some(16.0));
    assert_eq!(layer.scale_grid_line_color, Some(Color::rgb(1.0, 0.0, 0.0)));
    assert_eq!(layer.scale_begin_at_zero, Some(true));
    assert_eq!(layer.point_dot_radius, None);
}

#[test]
fn malformed_json_is_reported_as_invalid_data() {
    assert!(matches!(
        ConfigOverrides::from_json_str("{ not json"),
        Err(ChartError::InvalidData(_))
    ));
    assert!(matches!(
        ChartConfig::from_json_str(r#"{ "scale_line_color": "chartreuse-ish" }"#),
        Err(ChartError::InvalidData(_))
    ));
}

#[test]
fn config_survives_a_json_round_trip() {
    let config = ChartConfig::default()
        .with_begin_at_zero(true)
        .with_scale_font_size(13.0);

    let json = config.to_json_pretty().expect("serialize");
    let restored = ChartConfig::from_json_str(&json).expect("parse");

    assert_eq!(restored, config);
}

#[test]
fn missing_json_fields_fall_back_to_defaults() {
    let config = ChartConfig::from_json_str(r#"{ "show_scale": false }"#).expect("parse");

    assert!(!config.show_scale);
    assert_eq!(config.scale_font_size, ChartConfig::default().scale_font_size);
}
