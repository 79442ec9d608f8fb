//! Integration tests for shape groups

use approx::assert_relative_eq;
use canvas::{dispatch, CanvasEvent, ItemOptions, MemoryCanvas, SurfaceRef};
use geometry::{Angle, Point};
use shapes::{Circle, Group, Rectangle, Shape, ShapeContext, ShapeError, Square, Triangle};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn setup() -> (Rc<RefCell<MemoryCanvas>>, ShapeContext) {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let canvas = Rc::new(RefCell::new(MemoryCanvas::new()));
    let surface: SurfaceRef = canvas.clone();
    (canvas, ShapeContext::new(surface))
}

/// Three shapes spread over the surface
fn three_shapes(ctx: &ShapeContext) -> Vec<Rc<dyn Shape>> {
    vec![
        Rc::new(Rectangle::from_sides(ctx, 100.0, 50.0, 0.0, 0.0, ItemOptions::new()).unwrap()),
        Rc::new(Square::from_side(ctx, 20.0, 200.0, 100.0, ItemOptions::new()).unwrap()),
        Rc::new(Triangle::new(ctx, [(-30.0, 10.0), (0.0, 80.0), (10.0, 10.0)], ItemOptions::new()).unwrap()),
    ]
}

#[test]
fn test_group_bbox_is_union() {
    let (_, ctx) = setup();
    let group = ctx.group(three_shapes(&ctx));

    assert_eq!(group.len(), 3);
    assert_eq!(group.bounding_box().unwrap().as_tuple(), (-30.0, 0.0, 220.0, 120.0));
    assert_eq!(group.bounding_box_center().unwrap(), Point::new(95.0, 60.0));
}

#[test]
fn test_group_move_by_shifts_center() {
    let (canvas, ctx) = setup();
    let group = ctx.group(three_shapes(&ctx));
    let before = group.bounding_box_center().unwrap();
    let redraws = canvas.borrow().redraw_count();

    group.move_by(10.0, 20.0).unwrap();

    let after = group.bounding_box_center().unwrap();
    assert_eq!(after, Point::new(before.x + 10.0, before.y + 20.0));
    // One surface call for the whole group
    assert_eq!(canvas.borrow().redraw_count(), redraws + 1);
}

#[test]
fn test_group_move_to_and_scale() {
    let (_, ctx) = setup();
    let group = ctx.group(three_shapes(&ctx));

    group.move_to(0.0, 0.0).unwrap();
    assert_eq!(group.bounding_box().unwrap().as_tuple(), (0.0, 0.0, 250.0, 120.0));

    group.scale(0.0, 0.0, 0.5, 0.5).unwrap();
    assert_eq!(group.bounding_box().unwrap().as_tuple(), (0.0, 0.0, 125.0, 60.0));
}

#[test]
fn test_membership_tags() {
    let (_, ctx) = setup();
    let shapes = three_shapes(&ctx);
    let mut group = Group::new(&ctx, shapes.clone());

    for shape in &shapes {
        assert!(shape.tags().contains(&group.id_tag().to_string()));
        assert_eq!(shape.core().memberships(), vec![group.id_tag().to_string()]);
    }

    // Adding a member twice is a no-op
    group.add_graphics([shapes[0].clone()]);
    assert_eq!(group.len(), 3);

    group.remove_graphics([shapes[1].clone()]);
    assert_eq!(group.len(), 2);
    assert!(!group.contains(shapes[1].as_ref()));
    assert!(!shapes[1].tags().contains(&group.id_tag().to_string()));

    // Removing a non-member is ignored
    group.remove_graphics([shapes[1].clone()]);
    assert_eq!(group.len(), 2);
}

#[test]
fn test_reconfigure_keeps_membership() {
    let (_, ctx) = setup();
    let shapes = three_shapes(&ctx);
    let group = ctx.group(shapes.clone());

    shapes[0].configure(ItemOptions::new().with_tags(["highlighted"])).unwrap();
    let tags = shapes[0].tags();
    assert!(tags.contains(&"highlighted".to_string()));
    assert!(tags.contains(&group.id_tag().to_string()));
    assert!(tags.contains(&shapes[0].id_tag().to_string()));
}

#[test]
fn test_group_rotate_uses_one_redraw() {
    let (canvas, ctx) = setup();
    let group = ctx.group(three_shapes(&ctx));
    let redraws = canvas.borrow().redraw_count();

    group.rotate(Angle::Degrees(180.0), Point::ORIGIN).unwrap();

    assert_eq!(canvas.borrow().redraw_count(), redraws + 1);
    assert!(!canvas.borrow().is_suspended());
    let bbox = group.bounding_box().unwrap();
    assert_relative_eq!(bbox.x1, -220.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.y1, -120.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.x2, 30.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.y2, 0.0, epsilon = 1e-9);
}

#[test]
fn test_group_reflect_across_line() {
    let (_, ctx) = setup();
    let group = ctx.group(three_shapes(&ctx));

    group.reflect(vec![(0.0, 0.0), (0.0, 1.0)].into()).unwrap();
    let bbox = group.bounding_box().unwrap();
    assert_relative_eq!(bbox.x1, -220.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.x2, 30.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.y1, 0.0, epsilon = 1e-9);
    assert_relative_eq!(bbox.y2, 120.0, epsilon = 1e-9);

    let err = group.reflect(vec![(1.0, 1.0), (1.0, 1.0)].into()).unwrap_err();
    assert!(matches!(err, ShapeError::InvalidArgument(_)));
}

#[test]
fn test_group_uses_its_members_surface() {
    let (_, ctx_a) = setup();
    let (_, ctx_b) = setup();
    let rect: Rc<dyn Shape> = Rc::new(Rectangle::from_sides(&ctx_b, 40.0, 20.0, 10.0, 10.0, ItemOptions::new()).unwrap());
    let group = ctx_a.group([rect.clone()]);

    assert_eq!(group.bounding_box().unwrap(), rect.bounding_box().unwrap());
    group.move_by(5.0, 5.0).unwrap();
    assert_eq!(rect.bounding_box().unwrap().as_tuple(), (15.0, 15.0, 55.0, 35.0));
    assert!(rect.tags().contains(&group.id_tag().to_string()));

    // A shape on a different surface than the first member is not added
    let stray: Rc<dyn Shape> = Rc::new(Square::from_side(&ctx_a, 10.0, 0.0, 0.0, ItemOptions::new()).unwrap());
    let mut group = group;
    group.add_graphics([stray.clone()]);
    assert_eq!(group.len(), 1);
    assert!(!group.contains(stray.as_ref()));
}

#[test]
fn test_empty_group() {
    let (_, ctx) = setup();
    let group = ctx.group(Vec::<Rc<dyn Shape>>::new());

    assert!(group.is_empty());
    assert!(matches!(group.bounding_box(), Err(ShapeError::EmptyGroup(_))));
    assert!(matches!(group.move_by(1.0, 1.0), Err(ShapeError::EmptyGroup(_))));
    assert!(matches!(group.move_to(1.0, 1.0), Err(ShapeError::EmptyGroup(_))));
    assert!(matches!(group.scale(0.0, 0.0, 2.0, 2.0), Err(ShapeError::EmptyGroup(_))));
    assert!(matches!(group.unbind("<Button-1>", None), Err(ShapeError::EmptyGroup(_))));

    group.rotate(Angle::Degrees(45.0), Point::ORIGIN).unwrap();
    group.reflect(Point::ORIGIN.into()).unwrap();
}

#[test]
fn test_clone_group() {
    let (canvas, ctx) = setup();
    let group = ctx.group(three_shapes(&ctx));
    let copy = group.clone_group().unwrap();

    assert_eq!(canvas.borrow().item_count(), 6);
    assert_eq!(copy.len(), 3);
    assert_ne!(copy.id_tag(), group.id_tag());
    assert_eq!(copy.bounding_box().unwrap(), group.bounding_box().unwrap());

    for member in &copy {
        let tags = member.tags();
        assert!(tags.contains(&copy.id_tag().to_string()));
        assert!(!tags.contains(&group.id_tag().to_string()));
    }

    // Moving the copy leaves the original in place
    copy.move_by(5.0, 0.0).unwrap();
    assert_eq!(group.bounding_box().unwrap().x1, -30.0);
    assert_eq!(copy.bounding_box().unwrap().x1, -25.0);
}

#[test]
fn test_member_in_two_groups() {
    let (_, ctx) = setup();
    let circle: Rc<dyn Shape> = Rc::new(Circle::new(&ctx, 10.0, Point::ORIGIN, ItemOptions::new()).unwrap());
    let a = ctx.group([circle.clone()]);
    let b = ctx.group([circle.clone()]);

    assert_eq!(circle.core().memberships().len(), 2);
    a.move_by(5.0, 0.0).unwrap();
    assert_eq!(b.bounding_box().unwrap(), a.bounding_box().unwrap());

    // A clone of the member joins neither group
    let copy = circle.clone_boxed().unwrap();
    assert!(copy.core().memberships().is_empty());
    assert_eq!(copy.tags(), vec![copy.id_tag().to_string()]);
}

#[test]
fn test_group_bind_fires_for_members() {
    let (canvas, ctx) = setup();
    let shapes = three_shapes(&ctx);
    let group = ctx.group(shapes.clone());
    let hits = Rc::new(Cell::new(0));

    let counter = hits.clone();
    group
        .bind("<Enter>", Rc::new(move |_: &CanvasEvent| counter.set(counter.get() + 1)), false)
        .unwrap();

    let surface: SurfaceRef = canvas.clone();
    let event = CanvasEvent::new("<Enter>", 0.0, 0.0);
    for shape in &shapes {
        dispatch(&surface, shape.id_tag(), &event);
    }
    assert_eq!(hits.get(), 3);

    group.unbind("<Enter>", None).unwrap();
    dispatch(&surface, shapes[0].id_tag(), &event);
    assert_eq!(hits.get(), 3);
}
