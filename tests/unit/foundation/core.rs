use super::*;

#[test]
fn viewport_rejects_zero_dimensions() {
    assert!(Viewport::new(0, 10).is_err());
    assert!(Viewport::new(10, 0).is_err());
    assert!(Viewport::new(1, 1).is_ok());
}

#[test]
fn viewport_inset_shrinks_and_grows() {
    let v = Viewport::new(400, 300).unwrap();
    assert_eq!(v.inset(10.0), Rect::new(10.0, 10.0, 390.0, 290.0));
    assert_eq!(v.inset(-50.0), Rect::new(-50.0, -50.0, 450.0, 350.0));
    assert_eq!(v.center(), Point::new(200.0, 150.0));
}

#[test]
fn premultiply_rounds_to_nearest() {
    assert_eq!(
        Rgba8Premul::from_straight_rgba(255, 128, 0, 128),
        Rgba8Premul {
            r: 128,
            g: 64,
            b: 0,
            a: 128
        }
    );
    assert_eq!(
        Rgba8Premul::opaque(1, 2, 3).to_array(),
        [1, 2, 3, 255]
    );
}
