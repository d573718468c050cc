use chrysanthemum::animation::{BloomState, CLOSED_PAUSE, Direction, OPEN_PAUSE, STEP};

#[test]
fn default_state_is_closed_and_rising() {
    let s = BloomState::default();
    assert_eq!(s.progress(), 0.0);
    assert_eq!(s.direction(), Direction::Rising);
    assert_eq!(Direction::Rising.sign(), 1.0);
    assert_eq!(Direction::Falling.sign(), -1.0);
}

#[test]
fn hundred_ticks_reach_fully_open() {
    let mut s = BloomState::default();
    for tick in 1..100 {
        assert_eq!(s.advance(), None, "unexpected hold at tick {tick}");
        assert_eq!(s.direction(), Direction::Rising);
    }
    assert!((s.progress() - 0.99).abs() < 1e-9);

    assert_eq!(s.advance(), Some(OPEN_PAUSE));
    assert_eq!(s.progress(), 1.0);
    assert_eq!(s.direction(), Direction::Falling);
}

#[test]
fn falls_back_to_closed_after_another_hundred_ticks() {
    let mut s = BloomState::new(1.0, Direction::Falling);
    for _ in 1..100 {
        assert_eq!(s.advance(), None);
    }
    assert_eq!(s.advance(), Some(CLOSED_PAUSE));
    assert_eq!(s.progress(), 0.0);
    assert_eq!(s.direction(), Direction::Rising);
}

#[test]
fn oscillation_period_is_two_hundred_ticks() {
    let mut s = BloomState::default();
    let mut flips = Vec::new();
    for tick in 1..=400u32 {
        let before = s.direction();
        s.advance();
        if s.direction() != before {
            flips.push(tick);
        }
    }
    assert_eq!(flips, vec![100, 200, 300, 400]);
    assert_eq!(s, BloomState::default());
}

#[test]
fn progress_never_leaves_unit_interval() {
    let starts = [
        BloomState::default(),
        BloomState::new(0.5, Direction::Falling),
        BloomState::new(0.995, Direction::Rising),
        BloomState::new(0.004, Direction::Falling),
        BloomState::new(7.0, Direction::Rising),
        BloomState::new(-3.0, Direction::Falling),
    ];
    for mut s in starts {
        assert!((0.0..=1.0).contains(&s.progress()));
        for _ in 0..1000 {
            s.advance();
            assert!(
                (0.0..=1.0).contains(&s.progress()),
                "progress escaped: {}",
                s.progress()
            );
        }
    }
}

#[test]
fn hold_durations_match_bounds() {
    assert_eq!(OPEN_PAUSE.as_secs_f64(), 1.5);
    assert_eq!(CLOSED_PAUSE.as_secs_f64(), 0.5);
    assert_eq!(STEP, 0.01);

    let mut near_closed = BloomState::new(0.004, Direction::Falling);
    assert_eq!(near_closed.advance(), Some(CLOSED_PAUSE));
    let mut near_open = BloomState::new(0.995, Direction::Rising);
    assert_eq!(near_open.advance(), Some(OPEN_PAUSE));
}
