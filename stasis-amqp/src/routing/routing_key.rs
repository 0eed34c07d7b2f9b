/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Topic routing keys and header names.

pub const STASIS_APP_PREFIX: &str = "stasis.app";
pub const STASIS_CHANNEL_PREFIX: &str = "stasis.channel";
pub const AMI_PREFIX: &str = "ami";

pub const HEADER_CATEGORY: &str = "category";
pub const HEADER_NAME: &str = "name";
pub const HEADER_APPLICATION_NAME: &str = "application_name";

/// `prefix.suffix` with the suffix lowercased.
pub fn new_routing_key(prefix: &str, suffix: &str) -> String {
    format!("{prefix}.{}", suffix.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::{new_routing_key, AMI_PREFIX, STASIS_APP_PREFIX};

    #[test]
    fn suffix_is_lowercased_prefix_is_kept() {
        assert_eq!(new_routing_key(STASIS_APP_PREFIX, "MyApp"), "stasis.app.myapp");
        assert_eq!(
            new_routing_key(AMI_PREFIX, "DeviceStateChange"),
            "ami.devicestatechange"
        );
    }
}
