use proptest::prelude::*;
use toolpathkit_camtools::{ProgramSettings, RasterScanGenerator, RasterScanSettings};
use toolpathkit_core::{IntensityField, MotionInstruction, ToolpathError};

fn settings(serpentine: bool) -> RasterScanSettings {
    RasterScanSettings {
        pixel_size: 1.0,
        serpentine,
        min_z: -2.0,
        max_z: 0.0,
        ..Default::default()
    }
}

/// Column indices of the per-pixel cuts, grouped by row.
fn visited_columns(instructions: &[MotionInstruction], height: usize) -> Vec<Vec<usize>> {
    let mut rows = vec![Vec::new(); height];
    for inst in instructions {
        if let MotionInstruction::Linear {
            x: Some(x),
            y: Some(y),
            ..
        } = inst
        {
            rows[*y as usize].push(*x as usize);
        }
    }
    rows
}

proptest! {
    #[test]
    fn serpentine_rows_alternate_direction(width in 1usize..12, height in 1usize..12) {
        let data = vec![0.5f32; width * height];
        let field = IntensityField::from_scalar(&data, width, height).unwrap();
        let instructions = RasterScanGenerator::new(settings(true))
            .instructions(&field)
            .unwrap();

        for (y, cols) in visited_columns(&instructions, height).iter().enumerate() {
            prop_assert_eq!(cols.len(), width);
            if y % 2 == 1 {
                prop_assert!(cols.windows(2).all(|w| w[0] > w[1]), "row {} not decreasing: {:?}", y, cols);
            } else {
                prop_assert!(cols.windows(2).all(|w| w[0] < w[1]), "row {} not increasing: {:?}", y, cols);
            }
        }
    }

    #[test]
    fn raster_rows_emitted_in_order(width in 1usize..6, height in 1usize..10) {
        let data = vec![0.0f32; width * height];
        let field = IntensityField::from_scalar(&data, width, height).unwrap();
        let instructions = RasterScanGenerator::new(settings(false))
            .instructions(&field)
            .unwrap();

        let ys: Vec<f64> = instructions
            .iter()
            .filter_map(|inst| match inst {
                MotionInstruction::Linear { y: Some(y), .. } => Some(*y),
                _ => None,
            })
            .collect();
        prop_assert!(ys.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn test_z_mapping_extremes() {
    let data = [0.0f32, 1.0];
    let field = IntensityField::from_scalar(&data, 2, 1).unwrap();
    let gcode = RasterScanGenerator::new(settings(true))
        .generate(&field)
        .unwrap();

    assert!(
        gcode.contains("G1 X0.000 Y0.000 Z-2.000\n"),
        "intensity 0 should cut at min Z:\n{}",
        gcode
    );
    assert!(
        gcode.contains("G1 X1.000 Y0.000 Z0.000\n"),
        "intensity 1 should cut at max Z:\n{}",
        gcode
    );
}

#[test]
fn test_packed_rgb_input() {
    // White then black pixel
    let data = [255u8, 255, 255, 0, 0, 0];
    let field = IntensityField::from_packed(&data, 2, 1, 3).unwrap();
    let gcode = RasterScanGenerator::new(settings(false))
        .generate(&field)
        .unwrap();

    assert!(gcode.contains("G1 X0.000 Y0.000 Z0.000\n"));
    assert!(gcode.contains("G1 X1.000 Y0.000 Z-2.000\n"));
}

#[test]
fn test_empty_field_yields_header_and_footer_only() {
    let field = IntensityField::from_scalar(&[], 0, 0).unwrap();
    let gcode = RasterScanGenerator::new(RasterScanSettings::default())
        .generate(&field)
        .unwrap();

    assert_eq!(gcode, "G21\nG90\nG0 Z5.000\nM30\n");
}

#[test]
fn test_non_finite_settings_produce_no_output() {
    let data = [0.5f32; 6];
    let field = IntensityField::from_scalar(&data, 3, 2).unwrap();

    let bad = [
        RasterScanSettings {
            pixel_size: f64::NAN,
            ..settings(true)
        },
        RasterScanSettings {
            min_z: f64::NEG_INFINITY,
            ..settings(true)
        },
        RasterScanSettings {
            min_z: -1e308,
            max_z: 1e308,
            ..settings(true)
        },
        RasterScanSettings {
            pixel_size: f64::MAX,
            ..settings(true)
        },
        RasterScanSettings {
            program: ProgramSettings {
                feed_rate: f64::INFINITY,
                ..Default::default()
            },
            ..settings(true)
        },
    ];

    for s in bad {
        let result = RasterScanGenerator::new(s).generate(&field);
        assert!(
            matches!(result, Err(ToolpathError::InvalidSettings(_))),
            "expected InvalidSettings, got {:?}",
            result
        );
    }
}

#[test]
fn test_decimal_places_respected() {
    let data = [0.5f32];
    let field = IntensityField::from_scalar(&data, 1, 1).unwrap();
    let s = RasterScanSettings {
        program: ProgramSettings {
            decimal_places: 1,
            header: vec![],
            footer: vec![],
            ..Default::default()
        },
        ..settings(true)
    };
    let gcode = RasterScanGenerator::new(s).generate(&field).unwrap();
    assert_eq!(
        gcode,
        "G1 F1000.0\nG0 Z5.0\nG0 X0.0 Y0.0 Z5.0\nG1 X0.0 Y0.0 Z-1.0\nG0 Z5.0\n"
    );
}
