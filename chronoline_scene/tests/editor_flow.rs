// Copyright 2025 the Chronoline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end flow: scene hit test feeding the interaction controller.

use chronoline_interact::{HitTarget, InteractionController};
use chronoline_model::{ArtistBar, EventCard, ItemId, TimelineState};
use chronoline_scene::build_scene;
use chronoline_view::Viewport;
use kurbo::Point;

fn editor() -> (TimelineState, Viewport, InteractionController) {
    let mut state = TimelineState::new();
    state.add_event(EventCard::new(ItemId(1), "moon landing", 1969, "data:"));
    state.add_artist(ArtistBar::new(ItemId(2), "vivaldi", 1678, 1741, 600.0));
    state.selection.clear();
    (state, Viewport::new(), InteractionController::new())
}

#[test]
fn dragging_a_card_through_the_scene_moves_it() {
    let (mut state, mut viewport, mut controller) = editor();
    let scene = build_scene(&state, &viewport).unwrap();

    // Pointer lands on the card body, in container space.
    let grab_world = Point::new(
        scene.events[0].frame.x0 + 2.0,
        scene.events[0].frame.y0 + 2.0,
    );
    let grab = viewport.to_screen(grab_world);
    let hit = scene.hit_test(viewport.to_world(grab));
    assert!(matches!(hit, HitTarget::Item(_)));

    controller.pointer_down(hit, grab, &mut state, &viewport);
    let moved = controller.pointer_move(
        Point::new(grab.x, grab.y + 75.0),
        &mut state,
        &mut viewport,
    );
    controller.pointer_up();

    assert!(moved);
    assert_eq!(state.events[0].y, 175.0);

    // The rebuilt scene reflects the new position.
    let scene = build_scene(&state, &viewport).unwrap();
    assert_eq!(scene.events[0].frame.y0, 175.0);
}

#[test]
fn resizing_an_artist_via_its_scene_handle_updates_years() {
    let (mut state, mut viewport, mut controller) = editor();
    let scene = build_scene(&state, &viewport).unwrap();

    let bar = &scene.artists[0];
    let grab_world = Point::new(bar.frame.x1, bar.frame.center().y);
    let hit = scene.hit_test(grab_world);
    assert!(matches!(hit, HitTarget::Handle { .. }));

    let grab = viewport.to_screen(grab_world);
    controller.pointer_down(hit, grab, &mut state, &viewport);

    // -500..2000 over 4200 px is 1.68 px per year; 168 px is 100 years.
    controller.pointer_move(
        Point::new(grab.x + 168.0, grab.y),
        &mut state,
        &mut viewport,
    );
    controller.pointer_up();

    assert_eq!(state.artists[0].death_year, 1841);
    assert_eq!(state.artists[0].birth_year, 1678);
}

#[test]
fn background_click_deselects_and_the_scene_shows_it() {
    let (mut state, mut viewport, mut controller) = editor();
    state.selection.select_item(chronoline_model::ItemRef {
        kind: chronoline_model::ItemKind::Event,
        id: ItemId(1),
    });

    let scene = build_scene(&state, &viewport).unwrap();
    assert!(scene.events[0].selected);

    let empty = Point::new(10.0, 1500.0);
    let hit = scene.hit_test(viewport.to_world(empty));
    assert_eq!(hit, HitTarget::Background);
    controller.pointer_down(hit, empty, &mut state, &viewport);
    controller.pointer_up();

    let scene = build_scene(&state, &viewport).unwrap();
    assert!(!scene.events[0].selected);

    // Zoomed-in drags still resolve through the same scene geometry.
    viewport.set_zoom(2.0);
    let scene = build_scene(&state, &viewport).unwrap();
    assert_eq!(scene.transform, viewport.transform());
}
