//! Page-side half of the bridge.
//!
//! Requests flow JS -> Rust through `window.ipc.postMessage(JSON)`; results
//! flow back as `window.__aegisResolve({...})` / `window.__aegisProgress({...})`
//! evaluated in the page. [`INIT_SCRIPT`] installs both ends plus the
//! `window.aegis` convenience API, and must run before page script.

use aegis_config::AegisConfig;
use serde_json::Value;

use crate::capability::{CapabilityList, WILDCARD};

/// JavaScript that installs `window.aegis` and the resolver functions.
pub const INIT_SCRIPT: &str = r#"
(function() {
    if (window.aegis) return;

    var pending = {};
    var listeners = {};
    var nextId = 1;

    window.__aegisResolve = function(msg) {
        var entry = pending[msg.callbackId];
        if (!entry) return;
        delete pending[msg.callbackId];
        delete listeners[msg.callbackId];
        if (msg.success) {
            entry.resolve(msg.data);
        } else {
            entry.reject(new Error(msg.error || 'unknown error'));
        }
    };

    window.__aegisProgress = function(msg) {
        var listener = listeners[msg.callbackId];
        if (listener) {
            try { listener(msg.data); } catch (e) { console.error('[aegis] progress listener', e); }
        }
    };

    function invoke(action, payload, onProgress) {
        var id = nextId++;
        var promise = new Promise(function(resolve, reject) {
            pending[id] = { resolve: resolve, reject: reject };
            if (typeof onProgress === 'function') listeners[id] = onProgress;
            window.ipc.postMessage(JSON.stringify({
                action: action,
                payload: payload || {},
                callbackId: id
            }));
        });
        promise.callbackId = id;
        return promise;
    }

    function call(action) {
        return function(payload) { return invoke(action, payload); };
    }

    function stream(action) {
        return function(payload, onProgress) { return invoke(action, payload, onProgress); };
    }

    window.aegis = {
        invoke: invoke,
        allowed: function(action) {
            var list = window.__aegisAllowedAPIs || ['*'];
            if (list.indexOf('*') !== -1 || list.indexOf(action) !== -1) return true;
            var dot = action.indexOf('.');
            return dot !== -1 && list.indexOf(action.slice(0, dot)) !== -1;
        },
        cancel: function(promiseOrId) {
            var id = (promiseOrId && promiseOrId.callbackId) || promiseOrId;
            return invoke('cancel', { callbackId: id });
        },
        read: call('read'),
        write: call('write'),
        exists: call('exists'),
        mkdir: call('mkdir'),
        remove: call('remove'),
        copy: call('copy'),
        move: call('move'),
        env: call('env'),
        run: call('run'),
        runAsync: stream('run.async'),
        download: stream('download'),
        copyAsync: stream('copy.async'),
        dialog: {
            open: call('dialog.open'),
            save: call('dialog.save'),
            message: call('dialog.message')
        },
        app: {
            quit: call('app.quit'),
            minimize: call('app.minimize'),
            maximize: call('app.maximize'),
            getPath: function(name) { return invoke('app.getPath', { name: name }); }
        },
        window: {
            startDrag: call('window.startDrag'),
            resize: function(edge) { return invoke('window.resize', { edge: edge || 'se' }); },
            setSize: call('window.setSize'),
            getSize: call('window.getSize'),
            setPosition: call('window.setPosition'),
            getPosition: call('window.getPosition'),
            dragRegion: function(selector) {
                document.addEventListener('mousedown', function(e) {
                    if (e.button === 0 && e.target.closest(selector) &&
                        !e.target.closest('button, input, select, textarea, a')) {
                        invoke('window.startDrag', {});
                    }
                });
            },
            resizeHandles: function(map) {
                Object.keys(map).forEach(function(selector) {
                    document.addEventListener('mousedown', function(e) {
                        if (e.button === 0 && e.target.closest(selector)) {
                            e.preventDefault();
                            invoke('window.resize', { edge: map[selector] });
                        }
                    });
                });
            }
        }
    };
    window.Aegis = window.aegis;
})();
"#;

/// Entries exposed to page script as `window.__aegisAllowedAPIs`. An empty
/// (default-open) list is exposed as `["*"]`.
pub fn allowed_apis(capabilities: &CapabilityList) -> Vec<String> {
    if capabilities.is_default_open() {
        vec![WILDCARD.to_string()]
    } else {
        capabilities.entries().into_iter().map(str::to_string).collect()
    }
}

/// Script publishing the allow-list and page-visible config. Runs before
/// [`INIT_SCRIPT`].
pub fn config_script(config: &AegisConfig, capabilities: &CapabilityList) -> String {
    let allowed = Value::from(allowed_apis(capabilities));
    let page = config.page_config();
    format!("window.__aegisAllowedAPIs = {allowed};\nwindow.__aegisConfig = {page};\n")
}

/// Script that blocks the native context menu.
pub const DISABLE_CONTEXT_MENU_SCRIPT: &str =
    "document.addEventListener('contextmenu', function(e) { e.preventDefault(); });";

/// All scripts to inject at document start, in order.
pub fn init_scripts(config: &AegisConfig, capabilities: &CapabilityList) -> Vec<String> {
    let mut scripts = vec![config_script(config, capabilities), INIT_SCRIPT.to_string()];
    if !config.window.context_menu {
        scripts.push(DISABLE_CONTEXT_MENU_SCRIPT.to_string());
    }
    scripts
}
