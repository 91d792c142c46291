use super::*;

#[test]
fn identity_leaves_pixels_alone() {
    let mut px = vec![12, 130, 250, 77];
    ImageAdjust::IDENTITY.apply(&mut px);
    assert_eq!(px, vec![12, 130, 250, 77]);
}

#[test]
fn contrast_pushes_away_from_mid_gray() {
    let mut px = vec![64, 128, 192, 255];
    ImageAdjust {
        contrast: 2.0,
        ..ImageAdjust::IDENTITY
    }
    .apply(&mut px);
    assert!(px[0] < 64);
    assert!(px[1].abs_diff(129) <= 1);
    assert!(px[2] > 192);
    assert_eq!(px[3], 255);
}

#[test]
fn brightness_scales_and_clamps() {
    let mut px = vec![100, 200, 0, 10];
    ImageAdjust {
        brightness: 1.5,
        ..ImageAdjust::IDENTITY
    }
    .apply(&mut px);
    assert_eq!(px, vec![150, 255, 0, 10]);
}

#[test]
fn zero_saturation_is_grayscale() {
    let mut px = vec![200, 40, 90, 255];
    ImageAdjust {
        saturation: 0.0,
        ..ImageAdjust::IDENTITY
    }
    .apply(&mut px);
    assert!(px[0].abs_diff(px[1]) <= 1 && px[1].abs_diff(px[2]) <= 1);
}

#[test]
fn validate_rejects_negative_and_nan() {
    assert!(ImageAdjust::default().validate().is_ok());
    let bad = ImageAdjust {
        contrast: -1.0,
        ..ImageAdjust::IDENTITY
    };
    assert!(bad.validate().is_err());
    let nan = ImageAdjust {
        saturation: f32::NAN,
        ..ImageAdjust::IDENTITY
    };
    assert!(nan.validate().is_err());
}
