mod common;

mod tests {
    use screen_lamp::color::{DEFAULT_PALETTE, Rgb, named, rgb_from_u32};
    use screen_lamp::lamp::{
        DEFAULT_LAMP_CONFIG, Drag, LampConfig, LampState, MAX_BRIGHTNESS, MIN_BRIGHTNESS,
        clamp_brightness,
    };

    use crate::common::{RecordingDisplay, approx_eq};

    fn lamp() -> LampState<RecordingDisplay> {
        LampState::new(RecordingDisplay::default(), &DEFAULT_LAMP_CONFIG)
    }

    fn horizontal(dx: f32) -> Drag {
        Drag {
            dx,
            dy: 0.0,
            container_height: 1000,
        }
    }

    fn vertical(dy: f32, container_height: u32) -> Drag {
        Drag {
            dx: 0.0,
            dy,
            container_height,
        }
    }

    #[test]
    fn test_initial_state_is_pushed() {
        let lamp = lamp();
        assert_eq!(lamp.brightness(), MAX_BRIGHTNESS);
        assert_eq!(lamp.color(), named::WHITE);
        assert_eq!(lamp.palette_position().value(), 0.0);
        assert_eq!(lamp.output().last_brightness(), Some(1.0));
        assert_eq!(lamp.output().last_color(), Some(named::WHITE));
    }

    #[test]
    fn test_initial_color_snaps_position() {
        let config = LampConfig {
            color: named::BLUE,
            ..DEFAULT_LAMP_CONFIG
        };
        let lamp = LampState::new(RecordingDisplay::default(), &config);
        assert_eq!(lamp.palette_position().value(), 7.0);
    }

    #[test]
    fn test_set_brightness_clamps() {
        let mut lamp = lamp();
        for (input, expected) in [
            (0.5, 0.5),
            (0.0, MIN_BRIGHTNESS),
            (-3.0, MIN_BRIGHTNESS),
            (2.0, MAX_BRIGHTNESS),
            (0.01, MIN_BRIGHTNESS),
            (f32::INFINITY, MAX_BRIGHTNESS),
        ] {
            lamp.set_brightness(input);
            assert_eq!(lamp.brightness(), expected, "input {input}");
            assert_eq!(lamp.output().last_brightness(), Some(expected));
        }
    }

    #[test]
    fn test_set_brightness_ignores_nan() {
        let mut lamp = lamp();
        lamp.set_brightness(0.4);
        let writes = lamp.output().brightness.len();

        lamp.set_brightness(f32::NAN);
        assert_eq!(lamp.brightness(), 0.4);
        assert_eq!(lamp.output().brightness.len(), writes);
        assert_eq!(clamp_brightness(f32::NAN), None);
    }

    #[test]
    fn test_nan_drag_is_ignored() {
        let mut lamp = lamp();
        lamp.apply_drag(vertical(100.0, 1000));
        let position = lamp.palette_position();

        lamp.apply_drag(Drag {
            dx: f32::NAN,
            dy: 300.0,
            container_height: 1000,
        });
        lamp.apply_drag(horizontal(f32::NAN));
        assert!(approx_eq(lamp.brightness(), 0.9));
        assert_eq!(lamp.palette_position(), position);
        assert_eq!(lamp.color(), named::WHITE);
    }

    #[test]
    fn test_set_color_resyncs_palette() {
        let mut lamp = lamp();
        lamp.set_color(named::CYAN);
        assert_eq!(lamp.color(), named::CYAN);
        assert_eq!(lamp.palette_position().value(), 6.0);

        // Off-palette colors leave the position alone
        let off_palette = rgb_from_u32(0x12_3456);
        lamp.set_color(off_palette);
        assert_eq!(lamp.color(), off_palette);
        assert_eq!(lamp.palette_position().value(), 6.0);
        assert_eq!(lamp.output().last_color(), Some(off_palette));
    }

    #[test]
    fn test_horizontal_drag_walks_palette() {
        let mut lamp = lamp();

        // Dragging left moves forward through the palette
        lamp.apply_drag(horizontal(-100.0));
        assert!(approx_eq(lamp.palette_position().value(), 0.5));
        assert_eq!(lamp.color(), Rgb { r: 255, g: 128, b: 128 });

        lamp.apply_drag(horizontal(-100.0));
        assert!(approx_eq(lamp.palette_position().value(), 1.0));
        assert_eq!(lamp.color(), named::RED);

        // Brightness is untouched by horizontal drags
        assert_eq!(lamp.brightness(), MAX_BRIGHTNESS);
    }

    #[test]
    fn test_horizontal_drag_is_clamped() {
        let mut lamp = lamp();
        lamp.apply_drag(horizontal(100.0));
        assert_eq!(lamp.palette_position().value(), 0.0);
        assert_eq!(lamp.color(), named::WHITE);

        lamp.apply_drag(horizontal(-10_000.0));
        assert_eq!(
            lamp.palette_position().value(),
            DEFAULT_PALETTE.last_index() as f32
        );
        assert_eq!(lamp.color(), named::PINK);
    }

    #[test]
    fn test_drag_continues_from_resynced_position() {
        let mut lamp = lamp();
        lamp.set_color(named::BLUE);
        lamp.apply_drag(horizontal(200.0));
        assert_eq!(lamp.color(), named::CYAN);
    }

    #[test]
    fn test_vertical_drag_changes_brightness() {
        let mut lamp = lamp();

        // Dragging down dims
        lamp.apply_drag(vertical(100.0, 1000));
        assert!(approx_eq(lamp.brightness(), 0.9));

        // Dragging up brightens, up to the maximum
        lamp.apply_drag(vertical(-500.0, 1000));
        assert_eq!(lamp.brightness(), MAX_BRIGHTNESS);

        lamp.apply_drag(vertical(5000.0, 1000));
        assert_eq!(lamp.brightness(), MIN_BRIGHTNESS);

        // Color is untouched by vertical drags
        assert_eq!(lamp.color(), named::WHITE);
    }

    #[test]
    fn test_vertical_drag_without_height_is_noop() {
        let mut lamp = lamp();
        let writes = lamp.output().brightness.len();
        lamp.apply_drag(vertical(100.0, 0));
        assert_eq!(lamp.brightness(), MAX_BRIGHTNESS);
        assert_eq!(lamp.output().brightness.len(), writes);
    }

    #[test]
    fn test_equal_axes_count_as_vertical() {
        let mut lamp = lamp();
        lamp.apply_drag(Drag {
            dx: -50.0,
            dy: 50.0,
            container_height: 100,
        });
        assert!(approx_eq(lamp.brightness(), 0.5));
        assert_eq!(lamp.color(), named::WHITE);
    }

    #[test]
    fn test_brightness_label() {
        let mut lamp = lamp();
        assert!(!lamp.shows_brightness_label());

        lamp.set_brightness(0.5);
        assert!(lamp.shows_brightness_label());
        assert_eq!(lamp.brightness_percent(), 50);
        assert_eq!(lamp.label_color(), Rgb { r: 0, g: 0, b: 0 });

        lamp.set_color(named::RED);
        assert_eq!(lamp.label_color(), named::WHITE);
    }

    #[test]
    fn test_release_restores_display() {
        let lamp = lamp();
        let display = lamp.release();
        assert!(display.restored);
    }
}
