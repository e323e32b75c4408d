#![no_main]

use libfuzzer_sys::fuzz_target;
use poselib_core::{classify, paste_category, paste_pose, update_parameters, PoseLibrary};

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Document parsing followed by allocation must never panic.
    if let Ok(mut library) = PoseLibrary::from_json(text) {
        let _ = update_parameters(&mut library);
    }

    // Clipboard classification and decoding must never panic either.
    let _ = classify(text);
    let _ = paste_pose(text);
    let _ = paste_category(text);
});
