//! Binary for building WASM contracts from odra modules.
#![doc = "Binary for building WASM contracts from odra modules."]

#[allow(unused_imports)]
use bastion_contracts;

fn main() {
    // Compilation of the governance contracts is driven by odra-build
}
