use std::cell::{Cell, RefCell};
use std::rc::Rc;

use eframe_figures::event::StorageEvent;
use eframe_figures::figure::{Figure, FigureKind, factory};
use eframe_figures::state::{Configuration, Storage};
use eframe_figures::style::HIGHLIGHT_PEN;
use egui::{Color32, Pos2, Rect, Vec2};

fn setup() -> (Rc<Configuration>, Rc<RefCell<Storage>>) {
    let config = Rc::new(Configuration::new());
    let storage = Storage::new(Rc::clone(&config));
    (config, storage)
}

fn count_changes(storage: &Rc<RefCell<Storage>>) -> Rc<Cell<usize>> {
    let changes = Rc::new(Cell::new(0));
    let counter = Rc::clone(&changes);
    storage.borrow().subscribe(move |event: &StorageEvent| {
        if *event == StorageEvent::Changed {
            counter.set(counter.get() + 1);
        }
    });
    changes
}

fn click(storage: &Rc<RefCell<Storage>>, kind: FigureKind, x: f32, y: f32) {
    let style = storage.borrow().config().style();
    storage
        .borrow_mut()
        .add(factory::create(kind, Pos2::new(x, y), style));
}

fn unfinished_count(storage: &Storage) -> usize {
    storage
        .figures()
        .iter()
        .filter(|figure| !figure.is_finished())
        .count()
}

#[test]
fn test_at_most_one_unfinished_figure() {
    let (_config, storage) = setup();
    let sequence = [
        FigureKind::Line,
        FigureKind::Triangle,
        FigureKind::Triangle,
        FigureKind::Circle,
        FigureKind::Point,
        FigureKind::Rectangle,
        FigureKind::Rectangle,
        FigureKind::Square,
        FigureKind::Ellipse,
        FigureKind::Ellipse,
        FigureKind::Triangle,
    ];

    for (i, kind) in sequence.into_iter().enumerate() {
        click(&storage, kind, 10.0 + 5.0 * i as f32, 20.0 + 3.0 * i as f32);
        assert!(unfinished_count(&storage.borrow()) <= 1, "after click {i}");
    }

    let storage = storage.borrow();
    let kinds: Vec<_> = storage.figures().iter().map(|figure| figure.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            FigureKind::Point,
            FigureKind::Rectangle,
            FigureKind::Ellipse,
            FigureKind::Triangle
        ]
    );
    assert_eq!(storage.incomplete().map(|figure| figure.kind()), Some(FigureKind::Triangle));
}

#[test]
fn test_continuation_keeps_original_style_and_id() {
    let (config, storage) = setup();
    click(&storage, FigureKind::Line, 10.0, 10.0);
    let id = storage.borrow().figures()[0].id();

    config.set_pen_width(7);
    click(&storage, FigureKind::Line, 50.0, 60.0);

    let storage = storage.borrow();
    assert_eq!(storage.len(), 1);
    let line = storage.get(id).unwrap();
    assert!(line.is_finished());
    assert_eq!(line.style().pen_width, 2);
    assert_eq!(line.points(), vec![Pos2::new(10.0, 10.0), Pos2::new(50.0, 60.0)]);
}

#[test]
fn test_pen_width_reaches_selected_figures_only() {
    let (config, storage) = setup();
    click(&storage, FigureKind::Point, 20.0, 20.0);
    click(&storage, FigureKind::Point, 80.0, 80.0);
    let (selected, unselected) = {
        let storage = storage.borrow();
        (storage.figures()[0].id(), storage.figures()[1].id())
    };
    storage.borrow_mut().select_only(selected);
    let changes = count_changes(&storage);

    config.set_pen_width(5);

    let storage = storage.borrow();
    assert_eq!(storage.get(selected).unwrap().style().pen_width, 5);
    assert_eq!(storage.get(unselected).unwrap().style().pen_width, 2);
    assert_eq!(changes.get(), 1);
}

#[test]
fn test_unchanged_config_value_is_silent() {
    let (config, storage) = setup();
    click(&storage, FigureKind::Point, 20.0, 20.0);
    let id = storage.borrow().figures()[0].id();
    storage.borrow_mut().select_only(id);
    let changes = count_changes(&storage);

    config.set_pen_width(2);
    config.set_pen_width(0);
    assert_eq!(changes.get(), 0);
}

#[test]
fn test_pen_color_edit_while_selected_is_kept() {
    let (config, storage) = setup();
    click(&storage, FigureKind::Point, 20.0, 20.0);
    let id = storage.borrow().figures()[0].id();

    storage.borrow_mut().select_only(id);
    assert_eq!(storage.borrow().get(id).unwrap().style().pen_color, HIGHLIGHT_PEN);

    config.set_pen_color(Color32::RED);
    storage.borrow_mut().deselect_all();

    assert_eq!(storage.borrow().get(id).unwrap().style().pen_color, Color32::RED);
}

#[test]
fn test_radius_only_reaches_points() {
    let (config, storage) = setup();
    click(&storage, FigureKind::Point, 20.0, 20.0);
    click(&storage, FigureKind::Circle, 100.0, 100.0);
    click(&storage, FigureKind::Circle, 120.0, 100.0);
    let ids = storage.borrow().selected_ids();
    assert!(ids.is_empty());

    let all: Vec<_> = storage.borrow().figures().iter().map(|figure| figure.id()).collect();
    for id in &all {
        storage.borrow_mut().toggle_selected(*id);
    }
    config.set_radius(8);

    let storage = storage.borrow();
    assert_eq!(storage.get(all[0]).unwrap().radius(), Some(8));
    assert_eq!(storage.get(all[1]).unwrap().radius(), None);
    assert_eq!(storage.get(all[1]).unwrap().points()[1], Pos2::new(120.0, 100.0));
}

#[test]
fn test_delete_and_clear_notify() {
    let (_config, storage) = setup();
    click(&storage, FigureKind::Point, 20.0, 20.0);
    click(&storage, FigureKind::Point, 40.0, 40.0);
    click(&storage, FigureKind::Point, 60.0, 60.0);
    let first = storage.borrow().figures()[0].id();
    let changes = count_changes(&storage);

    storage.borrow_mut().select_only(first);
    assert_eq!(storage.borrow_mut().delete_selected(), 1);
    assert_eq!(storage.borrow().len(), 2);
    assert!(!storage.borrow_mut().delete(first));

    assert_eq!(storage.borrow_mut().clear_all(), 2);
    assert!(storage.borrow().is_empty());
    assert_eq!(storage.borrow_mut().clear_all(), 0);

    assert_eq!(changes.get(), 3);
}

#[test]
fn test_deselect_all_restores_every_figure() {
    let (_config, storage) = setup();
    click(&storage, FigureKind::Point, 20.0, 20.0);
    click(&storage, FigureKind::Line, 40.0, 40.0);
    click(&storage, FigureKind::Line, 90.0, 40.0);
    let ids: Vec<_> = storage.borrow().figures().iter().map(|figure| figure.id()).collect();
    let before: Vec<_> = storage.borrow().figures().iter().map(|figure| *figure.style()).collect();

    for id in &ids {
        storage.borrow_mut().toggle_selected(*id);
    }
    assert_eq!(storage.borrow().selected_ids(), ids);

    storage.borrow_mut().deselect_all();
    let storage = storage.borrow();
    assert!(storage.get_selected().is_empty());
    let after: Vec<_> = storage.figures().iter().map(|figure| *figure.style()).collect();
    assert_eq!(after, before);
}

#[test]
fn test_move_selected_checks_each_figure() {
    let (_config, storage) = setup();
    click(&storage, FigureKind::Point, 10.0, 50.0);
    click(&storage, FigureKind::Point, 50.0, 50.0);
    let ids: Vec<_> = storage.borrow().figures().iter().map(|figure| figure.id()).collect();
    for id in &ids {
        storage.borrow_mut().toggle_selected(*id);
    }

    let container = Rect::from_min_max(Pos2::ZERO, Pos2::new(100.0, 100.0));
    let moved = storage
        .borrow_mut()
        .move_selected(Vec2::new(-6.0, 0.0), container);

    assert_eq!(moved, 1);
    let storage = storage.borrow();
    assert_eq!(storage.get(ids[0]).unwrap().points(), vec![Pos2::new(10.0, 50.0)]);
    assert_eq!(storage.get(ids[1]).unwrap().points(), vec![Pos2::new(44.0, 50.0)]);
}

#[test]
fn test_figure_at_prefers_topmost() {
    let (_config, storage) = setup();
    click(&storage, FigureKind::Rectangle, 10.0, 10.0);
    click(&storage, FigureKind::Rectangle, 40.0, 40.0);
    click(&storage, FigureKind::Circle, 20.0, 20.0);
    click(&storage, FigureKind::Circle, 25.0, 20.0);

    let storage = storage.borrow();
    let top = storage.figures()[1].id();
    assert!(storage.figures().iter().all(|figure| figure.hit_test(Pos2::new(20.0, 20.0))));
    assert_eq!(storage.figure_at(Pos2::new(20.0, 20.0)), Some(top));
    assert_eq!(storage.figure_at(Pos2::new(300.0, 300.0)), None);
}

#[test]
fn test_resize_check_ignores_figures_already_outside() {
    let (_config, storage) = setup();
    click(&storage, FigureKind::Point, 2.0, 2.0);
    click(&storage, FigureKind::Rectangle, 100.0, 100.0);
    click(&storage, FigureKind::Rectangle, 300.0, 200.0);

    let canvas = |w: f32, h: f32| Rect::from_min_size(Pos2::ZERO, Vec2::new(w, h));
    let storage = storage.borrow();
    assert!(!storage.clipped_by_resize(canvas(800.0, 600.0), canvas(1600.0, 1200.0)));
    assert!(!storage.clipped_by_resize(canvas(800.0, 600.0), canvas(310.0, 210.0)));
    assert!(storage.clipped_by_resize(canvas(800.0, 600.0), canvas(300.0, 300.0)));
}

#[test]
fn test_discard_incomplete_notifies() {
    let (_config, storage) = setup();
    let notices = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&notices);
    storage.borrow().subscribe(move |event: &StorageEvent| {
        if let StorageEvent::Notice(text) = event {
            sink.borrow_mut().push(text.clone());
        }
    });

    assert!(!storage.borrow_mut().discard_incomplete());
    click(&storage, FigureKind::Triangle, 10.0, 10.0);
    assert!(storage.borrow_mut().discard_incomplete());

    assert!(storage.borrow().is_empty());
    assert_eq!(*notices.borrow(), vec!["Unfinished triangle was discarded".to_string()]);
}
