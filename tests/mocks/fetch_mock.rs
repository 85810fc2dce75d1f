use wasm_bindgen::prelude::*;

/// Replaces `window.fetch` with a mock that answers every request with
/// `status` after `delay_ms`, so in-flight form state can be observed.
pub fn setup_fetch_mock(status: u16, delay_ms: u32) -> bool {
    #[wasm_bindgen(inline_js = r#"
    export function setup_fetch_mock(status, delay_ms) {
        if (!window.__originalFetch) {
            window.__originalFetch = window.fetch;
        }
        window.__fetchCalls = [];

        window.fetch = function(request) {
            window.__fetchCalls.push(request.method + " " + request.url);
            console.log("[MOCK] fetch", request.method, request.url);
            const body = status >= 400 ? '{"message":"rejected"}' : null;
            return new Promise(function(resolve) {
                setTimeout(function() {
                    resolve(new Response(body, { status: status }));
                }, delay_ms);
            });
        };

        console.log("[MOCK] fetch mock setup complete");
        return true;
    }
    "#)]
    extern "C" {
        fn setup_fetch_mock(status: u16, delay_ms: u32) -> bool;
    }

    setup_fetch_mock(status, delay_ms)
}

/// Number of requests the mock has answered or is holding.
pub fn fetch_call_count() -> u32 {
    #[wasm_bindgen(inline_js = r#"
    export function fetch_call_count() {
        return (window.__fetchCalls || []).length;
    }
    "#)]
    extern "C" {
        fn fetch_call_count() -> u32;
    }

    fetch_call_count()
}

/// Most recent request seen by the mock, as `"METHOD url"`.
pub fn last_fetch_call() -> String {
    #[wasm_bindgen(inline_js = r#"
    export function last_fetch_call() {
        const calls = window.__fetchCalls || [];
        return calls.length ? calls[calls.length - 1] : "";
    }
    "#)]
    extern "C" {
        fn last_fetch_call() -> String;
    }

    last_fetch_call()
}

/// Puts the browser's own fetch back.
pub fn restore_fetch() {
    #[wasm_bindgen(inline_js = r#"
    export function restore_fetch() {
        if (window.__originalFetch) {
            window.fetch = window.__originalFetch;
            window.__originalFetch = undefined;
        }
    }
    "#)]
    extern "C" {
        fn restore_fetch();
    }

    restore_fetch()
}
