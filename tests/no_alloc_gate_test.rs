use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tui_memory::core::{GameConfig, GameEngine, GameSnapshot};
use tui_memory::term::{FrameBuffer, GameView, Viewport};

struct CountingAlloc;

static COUNT_ENABLED: AtomicBool = AtomicBool::new(false);
static ALLOC_COUNT: AtomicUsize = AtomicUsize::new(0);

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.alloc(layout)
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        System.dealloc(ptr, layout)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if COUNT_ENABLED.load(Ordering::Relaxed) {
            ALLOC_COUNT.fetch_add(1, Ordering::Relaxed);
        }
        System.realloc(ptr, layout, new_size)
    }
}

// Both gates share the global counter, so run them in one test.
fn with_alloc_counting<F: FnOnce()>(f: F) -> usize {
    ALLOC_COUNT.store(0, Ordering::Relaxed);
    COUNT_ENABLED.store(true, Ordering::Relaxed);
    f();
    COUNT_ENABLED.store(false, Ordering::Relaxed);
    ALLOC_COUNT.load(Ordering::Relaxed)
}

#[test]
fn frame_loop_hot_paths_do_not_allocate() {
    // Setup (outside counting) so one-time allocations don't trip the gate.
    let mut game = GameEngine::new(GameConfig::default(), 1);
    let mut snap = GameSnapshot::default();
    let view = GameView::default();
    let vp = Viewport::new(80, 24);
    let mut fb = FrameBuffer::new(vp.width, vp.height);
    let _ = game.drain_events().count();

    let values: Vec<u8> = game.deck().values();
    let other = values.iter().position(|&v| v != values[0]).unwrap();

    let allocs = with_alloc_counting(|| {
        for _ in 0..20 {
            // Activation, mismatch scheduling and resolution.
            let _ = game.activate_card(0);
            let _ = game.activate_card(other);
            for _ in 0..25 {
                let _ = game.tick(50);
            }
            for _ in game.drain_events() {}

            game.snapshot_into(&mut snap);
            view.render_into(&snap, Some(0), vp, &mut fb);
        }
    });

    assert_eq!(allocs, 0, "unexpected allocations in the frame loop: {allocs}");
}
