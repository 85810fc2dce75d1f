use wasm_bindgen::prelude::*;

/// Replaces `window.IntersectionObserver` with a mock that reports every
/// observed element as intersecting straight away, so reveal behavior can be
/// checked without scrolling.
pub fn setup_intersection_observer_mock() -> bool {
    #[wasm_bindgen(inline_js = r#"
    export function setup_intersection_observer_mock() {
        window.__observerOptions = [];
        window.__unobservedCount = 0;

        window.IntersectionObserver = function(callback, options) {
            this.callback = callback;
            window.__observerOptions.push(options || {});
            console.log("[MOCK] IntersectionObserver created");
        };

        window.IntersectionObserver.prototype.observe = function(target) {
            this.callback([{ isIntersecting: true, target: target }], this);
        };

        window.IntersectionObserver.prototype.unobserve = function(target) {
            window.__unobservedCount += 1;
        };

        window.IntersectionObserver.prototype.disconnect = function() {};

        console.log("[MOCK] IntersectionObserver mock setup complete");
        return true;
    }
    "#)]
    extern "C" {
        fn setup_intersection_observer_mock() -> bool;
    }

    setup_intersection_observer_mock()
}

/// Number of elements the widget stopped observing after revealing them.
pub fn unobserved_count() -> u32 {
    #[wasm_bindgen(inline_js = r#"
    export function unobserved_count() {
        return window.__unobservedCount || 0;
    }
    "#)]
    extern "C" {
        fn unobserved_count() -> u32;
    }

    unobserved_count()
}

/// Root margin passed to the most recently created observer.
pub fn last_root_margin() -> String {
    #[wasm_bindgen(inline_js = r#"
    export function last_root_margin() {
        const all = window.__observerOptions || [];
        return all.length ? String(all[all.length - 1].rootMargin) : "";
    }
    "#)]
    extern "C" {
        fn last_root_margin() -> String;
    }

    last_root_margin()
}
