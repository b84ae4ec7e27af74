//! Panel view navigation

use super::types::{PanelView, PickerMode};

/// Navigation requests that may change the panel view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewNav {
    /// Header title: days -> months -> years
    ZoomOut,
    /// A year cell was picked; a month must still be chosen
    YearPicked,
    /// A month cell was picked; back to the day grid
    MonthPicked,
    /// Panel switch between the day grid and the time selector
    ToggleTime,
}

/// Current panel view for one picker
///
/// `Time` is only reachable in `Time` and `DateTime` modes, and `Time` mode
/// never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelViewController {
    mode: PickerMode,
    view: PanelView,
}

impl PanelViewController {
    pub fn new(mode: PickerMode) -> Self {
        Self {
            mode,
            view: Self::initial_view(mode),
        }
    }

    pub fn initial_view(mode: PickerMode) -> PanelView {
        match mode {
            PickerMode::Time => PanelView::Time,
            _ => PanelView::Days,
        }
    }

    pub fn view(&self) -> PanelView {
        self.view
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn reset(&mut self) {
        self.view = Self::initial_view(self.mode);
    }

    /// Returns true if the view changed
    pub fn apply(&mut self, nav: ViewNav) -> bool {
        let next = self.next(nav);
        let changed = next != self.view;
        self.view = next;
        changed
    }

    fn next(&self, nav: ViewNav) -> PanelView {
        use PanelView::*;

        if self.mode == PickerMode::Time {
            return Time;
        }
        match (self.view, nav) {
            (Days, ViewNav::ZoomOut) => Months,
            (Months, ViewNav::ZoomOut) => Years,
            (Years, ViewNav::YearPicked) => Months,
            (Months, ViewNav::MonthPicked) => Days,
            (Days, ViewNav::ToggleTime) if self.mode == PickerMode::DateTime => Time,
            (Time, ViewNav::ToggleTime) => Days,
            (view, _) => view,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_NAV: [ViewNav; 4] = [
        ViewNav::ZoomOut,
        ViewNav::YearPicked,
        ViewNav::MonthPicked,
        ViewNav::ToggleTime,
    ];

    #[test]
    fn test_initial_views() {
        assert_eq!(PanelViewController::new(PickerMode::Date).view(), PanelView::Days);
        assert_eq!(PanelViewController::new(PickerMode::DateRange).view(), PanelView::Days);
        assert_eq!(PanelViewController::new(PickerMode::DateTime).view(), PanelView::Days);
        assert_eq!(PanelViewController::new(PickerMode::Time).view(), PanelView::Time);
    }

    #[test]
    fn test_zoom_out_and_back_down() {
        let mut ctl = PanelViewController::new(PickerMode::Date);
        assert!(ctl.apply(ViewNav::ZoomOut));
        assert_eq!(ctl.view(), PanelView::Months);
        assert!(ctl.apply(ViewNav::ZoomOut));
        assert_eq!(ctl.view(), PanelView::Years);
        assert!(!ctl.apply(ViewNav::ZoomOut));
        assert!(ctl.apply(ViewNav::YearPicked));
        assert_eq!(ctl.view(), PanelView::Months);
        assert!(ctl.apply(ViewNav::MonthPicked));
        assert_eq!(ctl.view(), PanelView::Days);
    }

    #[test]
    fn test_toggle_time_only_in_datetime() {
        let mut ctl = PanelViewController::new(PickerMode::DateTime);
        assert!(ctl.apply(ViewNav::ToggleTime));
        assert_eq!(ctl.view(), PanelView::Time);
        assert!(ctl.apply(ViewNav::ToggleTime));
        assert_eq!(ctl.view(), PanelView::Days);

        let mut ctl = PanelViewController::new(PickerMode::Date);
        assert!(!ctl.apply(ViewNav::ToggleTime));
        assert_eq!(ctl.view(), PanelView::Days);
    }

    #[test]
    fn test_time_mode_is_pinned() {
        let mut ctl = PanelViewController::new(PickerMode::Time);
        for nav in ALL_NAV {
            assert!(!ctl.apply(nav));
            assert_eq!(ctl.view(), PanelView::Time);
        }
    }

    #[test]
    fn test_time_unreachable_outside_time_modes() {
        // Walk every navigation sequence up to length 4
        for mode in [PickerMode::Date, PickerMode::DateRange] {
            let mut frontier = vec![PanelViewController::new(mode)];
            for _ in 0..4 {
                let mut next = Vec::new();
                for ctl in &frontier {
                    for nav in ALL_NAV {
                        let mut ctl = *ctl;
                        ctl.apply(nav);
                        assert_ne!(ctl.view(), PanelView::Time, "{mode:?}");
                        next.push(ctl);
                    }
                }
                frontier = next;
            }
        }
    }

    #[test]
    fn test_reset_restores_initial() {
        let mut ctl = PanelViewController::new(PickerMode::DateTime);
        ctl.apply(ViewNav::ZoomOut);
        ctl.reset();
        assert_eq!(ctl.view(), PanelView::Days);
    }
}
