// Copyright 2022 Chris Gubbin
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://apache.org/licenses/LICENSE-2.0> or the MIT license <LICENSE-MIT or
// http://opensource.org/licenses/MIT>, at your option. This file may not be
// copied, modified, or distributed except according to those terms.

use owo_colors::Style;

// Stylesheet used to colorize reports.
#[derive(Debug, Default)]
pub(crate) struct Styles {
    pub(crate) heading_style: Style,
    pub(crate) value_style: Style,
    pub(crate) warning_style: Style,
}

impl Styles {
    pub(crate) fn colorize(&mut self) {
        self.heading_style = Style::new().bright_blue().bold();
        self.value_style = Style::new().bright_green();
        self.warning_style = Style::new().yellow();
    }
}
