//! Teardown accounting: every byte a list allocates must be released by
//! `destroy` or drop.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;

use slist::LinkedList;

thread_local! {
    // Per-thread so that allocations made by other test threads don't count.
    static LIVE_BYTES: Cell<isize> = const { Cell::new(0) };
}

fn track(delta: isize) {
    let _ = LIVE_BYTES.try_with(|live| live.set(live.get() + delta));
}

fn live_bytes() -> isize {
    LIVE_BYTES.with(Cell::get)
}

struct CountingAlloc;

unsafe impl GlobalAlloc for CountingAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            track(layout.size() as isize);
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            track(layout.size() as isize);
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        track(-(layout.size() as isize));
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            track(new_size as isize - layout.size() as isize);
        }
        new_ptr
    }
}

#[global_allocator]
static GLOBAL: CountingAlloc = CountingAlloc;

#[test]
fn destroy_returns_to_baseline() {
    let baseline = live_bytes();

    let mut list = LinkedList::new();
    for n in 0..1_000u64 {
        list.add(Box::new(n)).unwrap();
    }
    for index in (0..500).step_by(7) {
        list.insert(index, Box::new(u64::MAX)).unwrap();
    }
    assert!(live_bytes() > baseline);

    let count = list.count();
    assert_eq!(list.destroy(), Ok(count));
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn drop_returns_to_baseline() {
    let baseline = live_bytes();
    {
        let list: LinkedList<String> = (0..256).map(|n| n.to_string()).collect();
        assert_eq!(list.count(), 256);
    }
    assert_eq!(live_bytes(), baseline);
}

#[test]
fn removed_payloads_are_handed_back_not_leaked() {
    let baseline = live_bytes();

    let mut list = LinkedList::try_with_capacity(8).unwrap();
    for word in ["alpha", "beta", "gamma"] {
        list.add(word.to_string()).unwrap();
    }
    let removed = list.remove(1).unwrap();
    let replaced = list.set(0, "delta".to_string()).unwrap();
    assert_eq!((removed.as_str(), replaced.as_str()), ("beta", "alpha"));

    drop((removed, replaced));
    list.clear();
    assert_eq!(list.count(), 0);
    assert_eq!(list.destroy(), Ok(0));
    assert_eq!(live_bytes(), baseline);
}
