use proptest::prelude::*;
use toolpathkit_core::TransformSettings;
use toolpathkit_visualizer::{
    parse_program, transform_program, ProgramTransformer, DEFAULT_DECIMAL_PLACES,
};

#[test]
fn test_reverse_then_offset_then_calibrate() {
    let settings = TransformSettings {
        origin_x: 5.0,
        reverse_x: true,
        calib_x: 0.1,
        ..Default::default()
    };
    let out = transform_program("G1 X10 Y0\n", &settings, DEFAULT_DECIMAL_PLACES).unwrap();
    assert_eq!(out, "G1 X-5.500 Y0.000\n");
}

#[test]
fn test_decimal_places_kept_for_fine_programs() {
    let settings = TransformSettings {
        origin_x: 0.00001,
        ..Default::default()
    };
    let out = transform_program("G1 X1.23456 Y0.00002\n", &settings, 5).unwrap();
    assert_eq!(out, "G1 X1.23457 Y0.00002\n");
}

#[test]
fn test_z_only_offset() {
    let settings = TransformSettings {
        origin_z: -1.0,
        reverse_x: true,
        reverse_y: true,
        calib_x: 0.5,
        calib_y: 0.5,
        ..Default::default()
    };
    let out = transform_program("G0 Z2", &settings, DEFAULT_DECIMAL_PLACES).unwrap();
    assert_eq!(out, "G0 Z1.000");
}

#[test]
fn test_program_passthrough_lines() {
    let settings = TransformSettings {
        origin_x: 1.0,
        origin_y: 1.0,
        ..Default::default()
    };
    let program = "(header)\nG21\nG90\nM3 S1000\nG0 X0 Y0 ; start\nG1 X2 Y2 F300\nM5\nM30\n";
    let out = transform_program(program, &settings, DEFAULT_DECIMAL_PLACES).unwrap();
    assert_eq!(
        out,
        "(header)\nG21\nG90\nM3 S1000\nG0 X1.000 Y1.000 ; start\nG1 X3.000 Y3.000 F300\nM5\nM30\n"
    );
}

proptest! {
    #[test]
    fn transformed_coordinates_follow_fixed_order(
        x in -1000.0f64..1000.0,
        y in -1000.0f64..1000.0,
        origin_x in -100.0f64..100.0,
        origin_y in -100.0f64..100.0,
        reverse_x in any::<bool>(),
        reverse_y in any::<bool>(),
        calib_x in -0.5f64..0.5,
        calib_y in -0.5f64..0.5,
    ) {
        let settings = TransformSettings {
            origin_x,
            origin_y,
            reverse_x,
            reverse_y,
            calib_x,
            calib_y,
            ..Default::default()
        };
        let input = format!("G1 X{:.4} Y{:.4}", x, y);
        let source = &parse_program(&input).unwrap()[0];
        let (sx, sy) = (source.x().unwrap(), source.y().unwrap());

        let transformer = ProgramTransformer::new(settings).unwrap();
        let out = transformer.transform_program(&input);
        let event = &parse_program(&out).unwrap()[0];

        let expect_x = ((if reverse_x { -sx } else { sx }) + origin_x) * (1.0 + calib_x);
        let expect_y = ((if reverse_y { -sy } else { sy }) + origin_y) * (1.0 + calib_y);
        prop_assert!((event.x().unwrap() - expect_x).abs() < 6e-4, "x {} vs {}", event.x().unwrap(), expect_x);
        prop_assert!((event.y().unwrap() - expect_y).abs() < 6e-4, "y {} vs {}", event.y().unwrap(), expect_y);
    }
}
