use cfg_aliases::cfg_aliases;

fn main() {
    // Setup cfg aliases
    cfg_aliases! {
        // Backends
        appkit_backend: { feature = "appkit" },
        gtk_backend: { feature = "gtk" },
        win32_backend: { feature = "win32" },
    }
}
