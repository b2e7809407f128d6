// Host-side tests for configuration defaults, patch merging and host
// option decoding.

use liquid_core::config::{
    BackgroundKind, BackgroundPatch, BubbleColor, BubblePatch, ConfigPatch, LiquidConfig,
};

#[test]
fn defaults_describe_the_stock_look() {
    let c = LiquidConfig::default();
    assert_eq!((c.stiffness, c.damping), (12.0, 9.0));
    assert_eq!(c.turbulence, 1.0);
    assert_eq!(c.wave, 1.0);
    assert_eq!(c.x_speed, 30.0);
    assert_eq!(c.parallax, 0.35);
    assert_eq!(c.normalization, 1.2);
    assert_eq!(c.gradient_from, "#7a0a10");
    assert_eq!(c.gradient_to, "#3a0003");
    assert!(c.auto_resize);
    assert_eq!(c.background.kind, BackgroundKind::Linear);
    assert!(!c.bubbles.enabled);
    assert_eq!(c.bubbles.color, BubbleColor::Auto);
}

#[test]
fn empty_patch_changes_nothing() {
    let c = LiquidConfig::default().with_patch(&ConfigPatch::default());
    assert_eq!(c, LiquidConfig::default());
}

#[test]
fn nested_patches_keep_siblings() {
    let mut c = LiquidConfig::default();
    c.apply(&ConfigPatch {
        bubbles: Some(BubblePatch {
            rate: Some(3.0),
            ..BubblePatch::default()
        }),
        ..ConfigPatch::default()
    });
    c.apply(&ConfigPatch {
        bubbles: Some(BubblePatch {
            enabled: Some(true),
            ..BubblePatch::default()
        }),
        background: Some(BackgroundPatch {
            angle: Some(45.0),
            ..BackgroundPatch::default()
        }),
        ..ConfigPatch::default()
    });
    assert!(c.bubbles.enabled);
    assert_eq!(c.bubbles.rate, 3.0);
    assert_eq!(c.bubbles.max_radius, 4.0);
    assert_eq!(c.background.angle, 45.0);
    assert_eq!(c.background.from, "#150b10");
}

#[test]
fn host_options_decode_with_short_names() {
    let json = r##"{
        "goal": 250,
        "value": 40,
        "k": 20,
        "c": 4,
        "xspeed": 5,
        "norm100": 1.5,
        "gradientFrom": "#112233",
        "backLift": 6,
        "autoResize": false,
        "background": { "type": "solid", "color": "#fff" },
        "bubbles": { "enabled": true, "minR": 2, "maxVy": 90, "color": "auto" }
    }"##;
    let patch: ConfigPatch = serde_json::from_str(json).unwrap();
    assert_eq!(patch.goal, Some(250.0));
    assert_eq!(patch.value, Some(40.0));

    let c = LiquidConfig::default().with_patch(&patch);
    assert_eq!(c.stiffness, 20.0);
    assert_eq!(c.damping, 4.0);
    assert_eq!(c.x_speed, 5.0);
    assert_eq!(c.normalization, 1.5);
    assert_eq!(c.gradient_from, "#112233");
    assert_eq!(c.back_lift, 6.0);
    assert!(!c.auto_resize);
    assert_eq!(c.background.kind, BackgroundKind::Solid);
    assert_eq!(c.background.color, "#fff");
    assert!(c.bubbles.enabled);
    assert_eq!(c.bubbles.min_radius, 2.0);
    assert_eq!(c.bubbles.max_rise_speed, 90.0);
    assert_eq!(c.bubbles.color, BubbleColor::Auto);
}

#[test]
fn long_names_and_fixed_bubble_color() {
    let json = r##"{
        "stiffness": 8,
        "xSpeed": 12,
        "normalization": 1.0,
        "background": { "kind": "none" },
        "bubbles": { "minRadius": 1, "maxRiseSpeed": 40, "color": "#abcdef" }
    }"##;
    let c = LiquidConfig::default().with_patch(&serde_json::from_str(json).unwrap());
    assert_eq!(c.stiffness, 8.0);
    assert_eq!(c.x_speed, 12.0);
    assert_eq!(c.normalization, 1.0);
    assert_eq!(c.background.kind, BackgroundKind::None);
    assert_eq!(c.bubbles.min_radius, 1.0);
    assert_eq!(c.bubbles.max_rise_speed, 40.0);
    assert_eq!(c.bubbles.color, BubbleColor::Fixed("#abcdef".to_string()));
}

#[test]
fn unknown_option_keys_are_ignored() {
    let patch: ConfigPatch = serde_json::from_str(r#"{"sparkle": true, "wave": 2}"#).unwrap();
    assert_eq!(patch.wave, Some(2.0));
}

#[test]
fn bubble_color_round_trips_through_strings() {
    assert_eq!(BubbleColor::from("AUTO".to_string()), BubbleColor::Auto);
    assert_eq!(String::from(BubbleColor::Auto), "auto");
    assert_eq!(
        serde_json::to_string(&BubbleColor::Fixed("#fff".into())).unwrap(),
        "\"#fff\""
    );
}
