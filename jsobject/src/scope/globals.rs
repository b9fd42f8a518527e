use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;

// ECMAScript built-ins and the browser APIs available to JS Objects.
static BUILTIN_GLOBALS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  let mut set = HashSet::<&'static str>::new();
  for name in [
    // Value properties.
    "globalThis",
    "Infinity",
    "NaN",
    "undefined",
    // Functions.
    "decodeURI",
    "decodeURIComponent",
    "encodeURI",
    "encodeURIComponent",
    "eval",
    "isFinite",
    "isNaN",
    "parseFloat",
    "parseInt",
    // Constructors and namespaces.
    "AggregateError",
    "Array",
    "ArrayBuffer",
    "Atomics",
    "BigInt",
    "BigInt64Array",
    "BigUint64Array",
    "Boolean",
    "DataView",
    "Date",
    "Error",
    "EvalError",
    "FinalizationRegistry",
    "Float32Array",
    "Float64Array",
    "Function",
    "Int16Array",
    "Int32Array",
    "Int8Array",
    "Intl",
    "JSON",
    "Map",
    "Math",
    "Number",
    "Object",
    "Promise",
    "Proxy",
    "RangeError",
    "ReferenceError",
    "Reflect",
    "RegExp",
    "Set",
    "SharedArrayBuffer",
    "String",
    "Symbol",
    "SyntaxError",
    "TypeError",
    "URIError",
    "Uint16Array",
    "Uint32Array",
    "Uint8Array",
    "Uint8ClampedArray",
    "WeakMap",
    "WeakRef",
    "WeakSet",
    // Browser.
    "AbortController",
    "Blob",
    "File",
    "FileReader",
    "FormData",
    "Headers",
    "Request",
    "Response",
    "TextDecoder",
    "TextEncoder",
    "URL",
    "URLSearchParams",
    "alert",
    "atob",
    "btoa",
    "cancelAnimationFrame",
    "clearInterval",
    "clearTimeout",
    "confirm",
    "console",
    "crypto",
    "document",
    "fetch",
    "localStorage",
    "location",
    "navigator",
    "performance",
    "prompt",
    "queueMicrotask",
    "requestAnimationFrame",
    "self",
    "sessionStorage",
    "setInterval",
    "setTimeout",
    "structuredClone",
    "window",
  ] {
    set.insert(name);
  }
  set
});

pub fn is_builtin_global(name: &str) -> bool {
  BUILTIN_GLOBALS.contains(name)
}
