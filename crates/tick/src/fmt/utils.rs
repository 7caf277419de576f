// Copyright (c) Microsoft Corporation.

use std::time::SystemTime;

use jiff::Timestamp as TimestampJiff;

use crate::{Error, Timestamp};

pub(super) fn from_jiff(value: TimestampJiff) -> Result<Timestamp, Error> {
    Timestamp::from_system_time(SystemTime::from(value))
}

pub(super) fn to_jiff(value: Timestamp) -> TimestampJiff {
    value
        .to_system_time()
        .try_into()
        .expect("conversion of tick timestamp to jiff stamp shall never fail")
}
