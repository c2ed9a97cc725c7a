//! Binary for generating contract schemas from odra modules.
#![doc = "Binary for generating contract schemas from odra modules."]

#[allow(unused_imports)]
use bastion_contracts;

fn main() {
    // Schemas of the contracts listed in Odra.toml are emitted by odra-build
}
