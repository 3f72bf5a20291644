use std::alloc::Layout;
use std::cell::{Cell, RefCell};
use std::ptr::NonNull;
use std::sync::Once;

use crate::align::is_ptr_aligned;
use crate::alloc::{BlockAllocator, CappedAllocator, Global};
use crate::slide_buffer::{CacheAlignedSlideBuffer, SlideBuffer};

/// Allocator that serves `remaining` allocations and fails every one after that.
struct FailingAllocator {
    remaining: Cell<usize>,
    live_blocks: Cell<isize>,
}

impl FailingAllocator {
    fn new(remaining: usize) -> FailingAllocator {
        FailingAllocator {
            remaining: Cell::new(remaining),
            live_blocks: Cell::new(0),
        }
    }

    fn take_one(&self) -> bool {
        let remaining = self.remaining.get();
        if remaining == 0 {
            return false;
        }
        self.remaining.set(remaining - 1);
        true
    }
}

unsafe impl BlockAllocator for FailingAllocator {
    fn allocate_zeroed(&self, layout: Layout) -> Option<NonNull<u8>> {
        if !self.take_one() {
            return None;
        }
        let p = Global.allocate_zeroed(layout);
        if p.is_some() {
            self.live_blocks.set(self.live_blocks.get() + 1);
        }
        p
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        layout: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if !self.take_one() {
            return None;
        }
        unsafe { Global.reallocate(ptr, layout, new_size) }
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        self.live_blocks.set(self.live_blocks.get() - 1);
        unsafe { Global.deallocate(ptr, layout) }
    }
}

/// Logger recording every message emitted on the current thread.
struct CapturingLogger;

thread_local! {
    static RECORDS: RefCell<Vec<(log::Level, String)>> = const { RefCell::new(Vec::new()) };
}

impl log::Log for CapturingLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS.with(|r| {
            r.borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger;

fn start_capturing_logs() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
    });
    RECORDS.with(|r| r.borrow_mut().clear());
}

fn captured_logs() -> Vec<(log::Level, String)> {
    RECORDS.with(|r| r.borrow_mut().drain(..).collect())
}

#[test]
fn test_new_is_unallocated() {
    let mut buf = SlideBuffer::<u8>::new();
    assert_eq!(buf.capacity(), 0);
    assert!(!buf.is_allocated());
    assert!(buf.as_ptr().is_null());
    assert!(buf.as_slice().is_empty());

    let storage = buf.acquire(0).unwrap();
    assert!(storage.is_empty());
    assert!(buf.as_ptr().is_null());
}

#[test]
fn test_first_acquire_is_exact_and_aligned() {
    let mut buf = SlideBuffer::<u32, 0, 1024>::new();
    let storage = buf.acquire(10).unwrap();
    assert_eq!(storage.len(), 10);
    assert!(storage.iter().all(|&v| v == 0));
    assert_eq!(buf.capacity(), 10);
    assert!(is_ptr_aligned(buf.as_ptr(), 16));
    assert_eq!(buf.heap_size(), 40);
}

#[test]
fn test_smaller_request_is_noop() {
    let mut buf = SlideBuffer::<u32>::new();
    let p = buf.acquire(10).unwrap().as_ptr();

    let storage = buf.acquire(5).unwrap();
    assert_eq!(storage.as_ptr(), p);
    assert_eq!(storage.len(), 10);
    assert_eq!(buf.capacity(), 10);

    assert_eq!(buf.acquire(10).unwrap().as_ptr(), p);
    assert_eq!(buf.acquire(0).unwrap().as_ptr(), p);
    assert_eq!(buf.capacity(), 10);
}

#[test]
fn test_growth_adds_increment_and_preserves_data() {
    let mut buf = SlideBuffer::<u32, 0, 1024>::new();
    let storage = buf.acquire(10).unwrap();
    for (i, v) in storage.iter_mut().enumerate() {
        *v = i as u32 * 7 + 1;
    }

    let storage = buf.acquire(2000).unwrap();
    assert_eq!(storage.len(), 2000 + 1024);
    for (i, &v) in storage[..10].iter().enumerate() {
        assert_eq!(v, i as u32 * 7 + 1);
    }
    assert!(storage[10..].iter().all(|&v| v == 0));
    assert_eq!(buf.capacity(), 3024);
    assert!(is_ptr_aligned(buf.as_ptr(), 16));
}

#[test]
fn test_custom_increment() {
    let mut buf = SlideBuffer::<u64, 0, 8>::new();
    buf.acquire(4).unwrap();
    assert_eq!(buf.capacity(), 4);
    buf.acquire(5).unwrap();
    assert_eq!(buf.capacity(), 13);
    buf.acquire(13).unwrap();
    assert_eq!(buf.capacity(), 13);
    buf.acquire(14).unwrap();
    assert_eq!(buf.capacity(), 22);
}

#[test]
fn test_initial_reserve() {
    let buf = SlideBuffer::<u16, 100>::new();
    assert_eq!(buf.capacity(), 100);
    assert!(buf.is_allocated());
    assert!(is_ptr_aligned(buf.as_ptr(), 16));

    // Growing past the reservation counts as growing existing storage.
    let mut buf = buf;
    buf.acquire(101).unwrap();
    assert_eq!(buf.capacity(), 101 + 1024);
}

#[test]
fn test_initial_reserve_failure_leaves_unallocated() {
    let buf = SlideBuffer::<u8, 100, 1024, 16, _>::new_in(FailingAllocator::new(0));
    assert_eq!(buf.capacity(), 0);
    assert!(!buf.is_allocated());
}

#[test]
fn test_clear() {
    let mut buf = SlideBuffer::<u8>::new();
    buf.acquire(64).unwrap();
    buf.clear();
    assert_eq!(buf.capacity(), 0);
    assert!(buf.as_ptr().is_null());
    assert!(buf.acquire(0).unwrap().is_empty());

    // Idempotent.
    buf.clear();
    assert_eq!(buf.capacity(), 0);

    // After a clear the next allocation is exact again.
    buf.acquire(3).unwrap();
    assert_eq!(buf.capacity(), 3);
}

#[test]
fn test_failed_growth_resets_buffer() {
    let mut buf = SlideBuffer::<u32, 0, 1024, 16, _>::new_in(FailingAllocator::new(1));
    buf.acquire(10).unwrap();
    assert_eq!(buf.capacity(), 10);
    assert_eq!(buf.allocator().live_blocks.get(), 1);

    let err = buf.acquire(2000).unwrap_err();
    assert!(err.is_allocation_failure());
    assert_eq!(buf.capacity(), 0);
    assert!(!buf.is_allocated());
    assert!(buf.as_ptr().is_null());
    assert_eq!(buf.allocator().live_blocks.get(), 0);
}

#[test]
fn test_failed_first_allocation() {
    let mut buf = SlideBuffer::<u32, 0, 1024, 16, _>::new_in(FailingAllocator::new(0));
    let err = buf.acquire(1).unwrap_err();
    assert!(err.is_allocation_failure());
    assert_eq!(buf.capacity(), 0);
}

#[test]
fn test_retry_after_capped_failure() {
    let mut buf = SlideBuffer::<u8, 0, 1024, 16, _>::new_in(CappedAllocator::new(4096));
    buf.acquire(1000).unwrap();
    buf.as_mut_slice()[0] = 42;

    // 4000 + 1024 exceeds the cap.
    assert!(buf.acquire(4000).is_err());
    assert_eq!(buf.capacity(), 0);

    // Starting over from the unallocated state sizes the block exactly.
    let storage = buf.acquire(4000).unwrap();
    assert_eq!(storage.len(), 4000);
    assert_eq!(storage[0], 0);
}

#[test]
fn test_size_overflow_is_allocation_failure() {
    let mut buf = SlideBuffer::<u64>::new();
    buf.acquire(1).unwrap();
    let err = buf.acquire(usize::MAX - 10).unwrap_err();
    assert!(err.is_allocation_failure());
    assert_eq!(buf.capacity(), 0);

    let err = buf.acquire(usize::MAX / 2).unwrap_err();
    assert!(err.is_allocation_failure());
    assert_eq!(buf.capacity(), 0);
}

#[test]
fn test_alignment_policy() {
    let mut buf = CacheAlignedSlideBuffer::<u8>::new();
    assert_eq!(buf.alignment(), 64);
    for wanted in [1, 3, 100, 5000] {
        buf.acquire(wanted).unwrap();
        assert!(is_ptr_aligned(buf.as_ptr(), 64));
    }

    #[derive(Clone, Copy)]
    #[repr(C, align(32))]
    struct Wide([u64; 4]);
    unsafe impl bytemuck::Zeroable for Wide {}
    unsafe impl bytemuck::Pod for Wide {}

    let mut buf = SlideBuffer::<Wide>::new();
    assert_eq!(buf.alignment(), 32);
    buf.acquire(3).unwrap();
    assert!(is_ptr_aligned(buf.as_ptr(), 32));
}

#[test]
fn test_as_bytes() {
    let mut buf = SlideBuffer::<u32>::new();
    buf.acquire(2).unwrap().copy_from_slice(&[0x01020304, 0x05060708]);
    let bytes = buf.as_bytes();
    assert_eq!(bytes.len(), 8);
    assert_eq!(&bytes[..4], &0x01020304u32.to_ne_bytes());
}

#[test]
fn test_move_transfers_ownership() {
    let mut a = SlideBuffer::<u8>::new();
    a.acquire(16).unwrap()[0] = 9;
    let p = a.as_ptr();

    let b = a;
    assert_eq!(b.as_ptr(), p);
    assert_eq!(b.as_slice()[0], 9);

    let mut c = SlideBuffer::<u8>::new();
    let taken = std::mem::take(&mut c);
    assert!(!taken.is_allocated());
    assert!(!c.is_allocated());
}

#[test]
fn test_drop_releases_storage() {
    let alloc = FailingAllocator::new(usize::MAX);
    {
        let mut buf = SlideBuffer::<u8, 0, 1024, 16, &FailingAllocator>::new_in(&alloc);
        buf.acquire(10).unwrap();
        buf.acquire(20).unwrap();
        assert_eq!(alloc.live_blocks.get(), 1);
    }
    assert_eq!(alloc.live_blocks.get(), 0);
}

#[test]
fn test_random_growth_preserves_data() {
    let mut rng = fastrand::Rng::with_seed(0x5eed);
    let mut buf = SlideBuffer::<u32, 0, 64>::new();
    let mut expected = Vec::<u32>::new();

    for _ in 0..200 {
        let wanted = rng.usize(0..5000);
        let old_capacity = buf.capacity();
        let storage = buf.acquire(wanted).unwrap();

        assert!(storage.len() >= wanted);
        assert!(storage.len() >= old_capacity);
        if wanted > old_capacity {
            let exact = if old_capacity == 0 { wanted } else { wanted + 64 };
            assert_eq!(storage.len(), exact);
        } else {
            assert_eq!(storage.len(), old_capacity);
        }
        assert_eq!(&storage[..expected.len()], &expected[..]);

        let written = rng.usize(0..=storage.len());
        for v in storage[..written].iter_mut() {
            *v = rng.u32(..);
        }
        expected.clear();
        expected.extend_from_slice(&storage[..written]);
        assert!(is_ptr_aligned(buf.as_ptr(), 16));
    }
}

#[test]
fn test_send() {
    fn assert_send<T: Send>() {}
    assert_send::<SlideBuffer<u64>>();
    assert_send::<SlideBuffer<u8, 0, 1024, 16, CappedAllocator>>();
}

#[test]
fn test_as_mut_ptr() {
    let mut buf = SlideBuffer::<u32>::new();
    assert!(buf.as_mut_ptr().is_null());

    buf.acquire(8).unwrap();
    let p = buf.as_mut_ptr();
    assert!(!p.is_null());
    assert_eq!(p as *const u32, buf.as_ptr());
    unsafe { p.add(7).write(0xABCD) };
    assert_eq!(buf.as_slice()[7], 0xABCD);

    buf.clear();
    assert!(buf.as_mut_ptr().is_null());
}

#[test]
fn test_growth_and_failure_logging() {
    start_capturing_logs();

    let mut buf = SlideBuffer::<u32, 0, 1024, 16, _>::new_in(FailingAllocator::new(2));
    buf.acquire(10).unwrap();
    buf.acquire(5).unwrap();
    buf.acquire(2000).unwrap();
    assert!(buf.acquire(5000).is_err());

    let logs = captured_logs();
    let traces: Vec<&String> = logs
        .iter()
        .filter(|(level, _)| *level == log::Level::Trace)
        .map(|(_, msg)| msg)
        .collect();
    assert_eq!(traces.len(), 2, "{logs:?}");
    assert!(traces[0].contains("grow from 0 to 10 elements"));
    assert!(traces[1].contains("grow from 10 to 3024 elements"));

    let warnings: Vec<&String> = logs
        .iter()
        .filter(|(level, _)| *level == log::Level::Warn)
        .map(|(_, msg)| msg)
        .collect();
    assert_eq!(warnings.len(), 1, "{logs:?}");
    assert!(warnings[0].contains("failed to grow 3024 element buffer"));
}
