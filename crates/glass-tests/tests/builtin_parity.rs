//! Built-in profiles and conversions against lcms2
//!
//! The built-ins are rebuilt in lcms2 from their published definitions. The
//! lcms2 ICC bytes are parsed back with moxcms so colorants can be compared
//! in the same representation.

use glass_core::{BuiltinProfile, ColorProfile, Image};
use glass_tests::compare_rgb_buffers;
use glass_tests::patterns::{TestPattern, generate_pattern, pattern_image, sizes};
use glass_tests::reference::{icc_bytes, lcms2_builtin, transform_lcms2};

/// Colorants are stored as s15Fixed16 by lcms2
const COLORANT_TOLERANCE: f64 = 1e-3;

/// Maximum per-channel difference in 8-bit output codes
const CODE_TOLERANCE: u8 = 2;

const RGB_BUILTINS: [BuiltinProfile; 4] = [
    BuiltinProfile::AdobeRgb1998,
    BuiltinProfile::AppleRgb,
    BuiltinProfile::ColorMatchRgb,
    BuiltinProfile::Srgb,
];

#[test]
fn test_builtin_colorants_match_lcms2() {
    for which in RGB_BUILTINS {
        let reference = lcms2_builtin(which).expect("lcms2 profile");
        let parsed = moxcms::ColorProfile::new_from_slice(&icc_bytes(&reference).unwrap())
            .expect("moxcms parse of lcms2 output");
        let ours = which.load();
        let ours = ours.inner();

        let pairs = [
            ("red", ours.red_colorant, parsed.red_colorant),
            ("green", ours.green_colorant, parsed.green_colorant),
            ("blue", ours.blue_colorant, parsed.blue_colorant),
        ];
        for (channel, a, b) in pairs {
            let diff = (a.x - b.x).abs().max((a.y - b.y).abs()).max((a.z - b.z).abs());
            assert!(
                diff < COLORANT_TOLERANCE,
                "{} {} colorant: ours={:?} lcms2={:?}",
                which,
                channel,
                a,
                b
            );
        }
    }
}

#[test]
fn test_builtins_are_not_equivalent_to_each_other() {
    for a in RGB_BUILTINS {
        for b in RGB_BUILTINS {
            assert_eq!(a.load().is_equivalent(&b.load()), a == b, "{} vs {}", a, b);
        }
    }
}

#[test]
fn test_adobe_to_srgb_matches_lcms2() {
    let adobe = lcms2_builtin(BuiltinProfile::AdobeRgb1998).unwrap();
    let srgb = lcms2_builtin(BuiltinProfile::Srgb).unwrap();
    let (w, h) = sizes::SMALL;

    for pattern in TestPattern::COLOR {
        let input = generate_pattern(pattern, w as usize, h as usize);
        let expected = transform_lcms2(&adobe, &srgb, &input).unwrap();

        let mut image = Image::new(pattern_image(pattern, w, h))
            .with_color_profile(ColorProfile::new_adobe_rgb_1998());
        image.add_profile(ColorProfile::new_srgb()).unwrap();
        let actual = image.pixels().to_rgb8().into_raw();

        let stats = compare_rgb_buffers(&expected, &actual);
        assert!(
            stats.within(CODE_TOLERANCE),
            "pattern {:?}: {}",
            pattern,
            stats.to_json()
        );
    }
}

#[test]
fn test_srgb_to_gamma_18_builtins_match_lcms2() {
    let srgb = lcms2_builtin(BuiltinProfile::Srgb).unwrap();
    let (w, h) = sizes::TINY;

    for which in [BuiltinProfile::AppleRgb, BuiltinProfile::ColorMatchRgb] {
        let target = lcms2_builtin(which).unwrap();
        for pattern in TestPattern::COLOR {
            let input = generate_pattern(pattern, w as usize, h as usize);
            let expected = transform_lcms2(&srgb, &target, &input).unwrap();

            let mut image =
                Image::new(pattern_image(pattern, w, h)).with_color_profile(ColorProfile::new_srgb());
            image.add_profile(which.load()).unwrap();
            let actual = image.pixels().to_rgb8().into_raw();

            let stats = compare_rgb_buffers(&expected, &actual);
            assert!(
                stats.within(CODE_TOLERANCE),
                "{} pattern {:?}: {}",
                which,
                pattern,
                stats.to_json()
            );
        }
    }
}

#[test]
fn test_srgb_to_srgb_is_untouched() {
    let (w, h) = sizes::SMALL;
    let source = pattern_image(TestPattern::Random(7), w, h);
    let mut image = Image::new(source.clone()).with_color_profile(ColorProfile::new_srgb());
    image.add_profile(ColorProfile::new_srgb()).unwrap();
    assert_eq!(image.pixels().to_rgb8(), source.to_rgb8());
}
