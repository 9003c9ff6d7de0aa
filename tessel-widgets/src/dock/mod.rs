use std::rc::Rc;

use tessel_core::kurbo::{Point, Rect, Size};
use tessel_core::peniko::Brush;
use tessel_core::text::{TextLine, TextShaper};
use tessel_core::update::Update;
use tessel_core::vgi::{draw_border, fill_rect, Drawable, Graphics};
use tessel_core::widget::{Sizes, Widget};
use tessel_core::window::{ModifiersState, MouseButton};
use tessel_theme::border::Insets;
use tessel_theme::dock::DockHeaderTheme;
use tessel_theme::id::WidgetId;

use crate::svg::icons::{window_maximize, window_restore};
use crate::svg::{DrawableSvg, Paint};

/// Tab packing.
pub mod layout;
mod tab;

pub use layout::{overflow_label, pack, PackInput, PackedRow};
pub use tab::{DockTab, Dockable};

/// Something the user asked the header's owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockAction {
    /// A tab was clicked and is now current.
    Select(usize),
    /// The close button of a tab was clicked.
    Close(usize),
    /// The overflow button was clicked. Show [DockHeader::overflow_items] in a popup.
    ShowOverflow,
    /// Maximize the dock this header belongs to.
    Maximize,
    /// Restore the dock from its maximized state.
    Restore,
}

/// The tab strip at the top of a dock.
///
/// Tabs are packed left to right. When they do not fit they are first squeezed, then hidden
/// behind an overflow button, see [layout]. A maximize/restore button sits at the right end.
/// Clicks are reported through [DockHeader::take_action].
pub struct DockHeader {
    theme: DockHeaderTheme,
    shaper: Rc<dyn TextShaper>,
    frame: Rect,
    tabs: Vec<DockTab>,
    current: Option<usize>,
    overflow_frame: Option<Rect>,
    hidden_count: usize,
    maximize_icon: DrawableSvg,
    maximize_frame: Option<Rect>,
    maximized: bool,
    drag_insert_index: Option<usize>,
    action: Option<DockAction>,
    update: Update,
}

impl DockHeader {
    /// Create an empty header.
    pub fn new(theme: DockHeaderTheme, shaper: Rc<dyn TextShaper>) -> Self {
        let maximize_icon = Self::icon(&theme, shaper.as_ref(), false);
        Self {
            theme,
            shaper,
            frame: Rect::ZERO,
            tabs: Vec::new(),
            current: None,
            overflow_frame: None,
            hidden_count: 0,
            maximize_icon,
            maximize_frame: None,
            maximized: false,
            drag_insert_index: None,
            action: None,
            update: Update::empty(),
        }
    }

    /// Add tabs for `dockables`, the first one current.
    pub fn with_tabs(mut self, dockables: impl IntoIterator<Item = Rc<dyn Dockable>>) -> Self {
        for dockable in dockables {
            self.add_tab(dockable, usize::MAX);
        }
        self
    }

    fn icon(theme: &DockHeaderTheme, shaper: &dyn TextShaper, maximized: bool) -> DrawableSvg {
        let side = shaper.shape(&theme.title_font, &[]).ascent;
        let svg = if maximized {
            window_restore()
        } else {
            window_maximize()
        };
        DrawableSvg::new(svg, Size::new(side, side)).with_paint(Paint::fill(theme.button_ink))
    }

    /// The header theme.
    pub fn theme(&self) -> &DockHeaderTheme {
        &self.theme
    }

    /// Replace the header theme.
    pub fn set_theme(&mut self, theme: DockHeaderTheme) {
        self.maximize_icon = Self::icon(&theme, self.shaper.as_ref(), self.maximized);
        self.theme = theme;
        self.mark_for_layout();
    }

    /// The tabs, in order.
    pub fn tabs(&self) -> &[DockTab] {
        &self.tabs
    }

    /// Index of the tab showing `dockable`.
    pub fn index_of(&self, dockable: &Rc<dyn Dockable>) -> Option<usize> {
        self.tabs
            .iter()
            .position(|tab| Rc::ptr_eq(tab.dockable(), dockable))
    }

    /// Index of the current tab.
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Make the tab at `index` current. Out of range indexes are ignored.
    pub fn set_current(&mut self, index: usize) {
        if index < self.tabs.len() && self.current != Some(index) {
            self.current = Some(index);
            self.mark_for_layout();
        }
    }

    /// Insert a tab for `dockable` at `index`, or at the end when `index` is out of range.
    /// The first tab added becomes current. Returns where the tab went.
    pub fn add_tab(&mut self, dockable: Rc<dyn Dockable>, index: usize) -> usize {
        let index = index.min(self.tabs.len());
        self.tabs.insert(index, DockTab::new(dockable));
        self.current = match self.current {
            Some(current) if current >= index => Some(current + 1),
            None => Some(index),
            current => current,
        };
        self.mark_for_layout();
        index
    }

    /// Remove the tab at `index`. A neighbor becomes current if it was.
    pub fn close(&mut self, index: usize) -> Option<Rc<dyn Dockable>> {
        if index >= self.tabs.len() {
            return None;
        }
        let tab = self.tabs.remove(index);
        self.current = match self.current {
            _ if self.tabs.is_empty() => None,
            Some(current) if current > index => Some(current - 1),
            Some(current) if current == index => Some(index.min(self.tabs.len() - 1)),
            current => current,
        };
        if self.drag_insert_index.is_some() {
            self.drag_insert_index = None;
        }
        self.mark_for_layout();
        Some(tab.dockable().clone())
    }

    /// Re-read the title of the tab at `index` from its content.
    pub fn update_title(&mut self, index: usize) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.update_title();
            self.mark_for_layout();
        }
    }

    /// True while the dock is maximized.
    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    /// Switch the maximize button between its maximize and restore forms.
    pub fn set_maximized(&mut self, maximized: bool) {
        if self.maximized != maximized {
            self.maximized = maximized;
            self.maximize_icon = Self::icon(&self.theme, self.shaper.as_ref(), maximized);
            self.mark_for_layout();
        }
    }

    /// What clicking the maximize button asks for.
    pub fn maximize_button_action(&self) -> DockAction {
        if self.maximized {
            DockAction::Restore
        } else {
            DockAction::Maximize
        }
    }

    /// Tooltip of the maximize button.
    pub fn maximize_button_tooltip(&self) -> &'static str {
        if self.maximized {
            "Restore"
        } else {
            "Maximize"
        }
    }

    /// Frame of the overflow button, `None` while every tab fits.
    pub fn overflow_frame(&self) -> Option<Rect> {
        self.overflow_frame
    }

    /// Label of the overflow button.
    pub fn overflow_label(&self) -> String {
        overflow_label(self.hidden_count)
    }

    /// Frame of the maximize/restore button.
    pub fn maximize_frame(&self) -> Option<Rect> {
        self.maximize_frame
    }

    /// The hidden tabs as (index, title), for the overflow popup.
    pub fn overflow_items(&self) -> Vec<(usize, String)> {
        self.tabs
            .iter()
            .enumerate()
            .filter(|(_, tab)| tab.is_hidden())
            .map(|(i, tab)| (i, tab.title().to_string()))
            .collect()
    }

    /// Make a tab picked from the overflow popup current. That brings it into view.
    pub fn select_overflow_item(&mut self, index: usize) {
        if self.tabs.get(index).is_some_and(DockTab::is_hidden) {
            self.set_current(index);
        }
    }

    /// Take the action raised by the last click, if any.
    pub fn take_action(&mut self) -> Option<DockAction> {
        self.action.take()
    }

    /// Tooltip for whatever is under `pos`.
    pub fn tooltip_at(&self, pos: Point) -> Option<String> {
        if self.maximize_frame.is_some_and(|frame| frame.contains(pos)) {
            return Some(self.maximize_button_tooltip().to_string());
        }
        self.tab_at(pos)
            .map(|i| self.tabs[i].tooltip())
            .filter(|tooltip| !tooltip.is_empty())
    }

    fn tab_at(&self, pos: Point) -> Option<usize> {
        self.tabs
            .iter()
            .position(|tab| tab.frame().is_some_and(|frame| frame.contains(pos)))
    }

    /// Content area inside the header border, in local coordinates.
    pub fn content_rect(&self) -> Rect {
        let insets = self.theme.header_border.insets();
        Rect::new(
            insets.left,
            insets.top,
            self.frame.width() - insets.right,
            self.frame.height() - insets.bottom,
        )
    }

    fn button_size(&self, content: Size) -> Size {
        let insets: Insets = self.theme.button_insets;
        Size::new(content.width + insets.width(), content.height + insets.height())
    }

    fn overflow_size(&self, hidden: usize) -> Size {
        let font = &self.theme.title_font;
        let label = overflow_label(hidden);
        self.button_size(Size::new(
            self.shaper.measure(font, &label),
            self.shaper.line_height(font),
        ))
    }

    fn tab_sizes(&self) -> Vec<Size> {
        self.tabs
            .iter()
            .map(|tab| tab.preferred_size(self.shaper.as_ref(), &self.theme))
            .collect()
    }

    /// Size constraints before any tab is squeezed or hidden.
    pub fn layout_sizes(&self) -> Sizes {
        let tabs = self.tab_sizes();
        let buttons = [self.button_size(self.maximize_icon.logical_size())];
        let input = PackInput {
            tabs: &tabs,
            buttons: &buttons,
            current: self.current,
            content: Rect::ZERO,
            minimum_tab_width: self.theme.minimum_tab_width,
            gap: self.theme.tab_gap,
        };
        layout::layout_sizes(&input, self.theme.header_border.insets())
    }

    /// Pack tabs and buttons into the content area.
    pub fn perform_layout(&mut self) {
        let tabs = self.tab_sizes();
        let buttons = [self.button_size(self.maximize_icon.logical_size())];
        let input = PackInput {
            tabs: &tabs,
            buttons: &buttons,
            current: self.current,
            content: self.content_rect(),
            minimum_tab_width: self.theme.minimum_tab_width,
            gap: self.theme.tab_gap,
        };
        let row = pack(&input, |hidden| self.overflow_size(hidden));
        for (tab, frame) in self.tabs.iter_mut().zip(row.tabs) {
            tab.set_frame(frame);
        }
        self.overflow_frame = row.overflow;
        self.hidden_count = row.hidden_count;
        self.maximize_frame = row.buttons.first().copied();
    }

    fn mark_for_layout(&mut self) {
        self.perform_layout();
        self.update.insert(Update::LAYOUT | Update::DRAW);
    }

    /// The insert index while something is dragged over the header.
    pub fn drag_insert_index(&self) -> Option<usize> {
        self.drag_insert_index
    }

    /// Track a drag at `pos`, returning where a drop would insert: before a tab when left of
    /// its center, after it when right of its center, otherwise at the end.
    pub fn drag_over(&mut self, pos: Point) -> usize {
        let mut index = self.tabs.len();
        for (i, tab) in self.tabs.iter().enumerate() {
            let Some(frame) = tab.frame() else {
                continue;
            };
            if pos.x < frame.center().x {
                index = i;
                break;
            }
            if pos.x < frame.x1 {
                index = i + 1;
                break;
            }
        }
        if self.drag_insert_index != Some(index) {
            self.drag_insert_index = Some(index);
            self.update.insert(Update::DRAW);
        }
        index
    }

    /// The drag left the header.
    pub fn drag_exit(&mut self) {
        if self.drag_insert_index.take().is_some() {
            self.update.insert(Update::DRAW);
        }
    }

    /// Finish a drag at `pos`, returning the insert index for the dropped content.
    pub fn drop(&mut self, pos: Point) -> usize {
        let index = self.drag_over(pos);
        self.drag_exit();
        index
    }

    fn drop_indicator(&self, index: usize) -> Rect {
        let content = self.content_rect();
        let insert = self.theme.tab_insert_size;
        let next = self.tabs.iter().skip(index).find_map(DockTab::frame);
        let x = match next {
            Some(frame) => frame.x0 - ((self.theme.tab_gap - insert) / 2.0 + insert + 1.0),
            None => self
                .tabs
                .iter()
                .filter_map(DockTab::frame)
                .last()
                .map_or(content.x0, |frame| frame.x1),
        };
        Rect::new(x, content.y0, x + insert, content.y1)
    }

    /// Paint the header.
    pub fn default_draw(&mut self, graphics: &mut dyn Graphics, _dirty: Rect) {
        let bounds = self.frame.with_origin(Point::ZERO);
        fill_rect(graphics, bounds, self.theme.background_ink);
        for (i, tab) in self.tabs.iter().enumerate() {
            if let Some(frame) = tab.frame() {
                tab.draw(
                    graphics,
                    self.shaper.as_ref(),
                    &self.theme,
                    frame,
                    self.current == Some(i),
                );
            }
        }
        let insets = self.theme.button_insets;
        if let Some(frame) = self.overflow_frame {
            let font = &self.theme.title_font;
            let line = TextLine::from_str(self.shaper.as_ref(), font, &self.overflow_label());
            line.draw(
                self.shaper.as_ref(),
                graphics,
                font,
                Point::new(frame.x0 + insets.left, frame.y0 + insets.top + line.baseline()),
                &Brush::Solid(self.theme.button_ink),
            );
        }
        if let Some(frame) = self.maximize_frame {
            let icon = Rect::new(
                frame.x0 + insets.left,
                frame.y0 + insets.top,
                frame.x1 - insets.right,
                frame.y1 - insets.bottom,
            );
            self.maximize_icon.draw_in_rect(graphics, icon);
        }
        if let Some(index) = self.drag_insert_index {
            fill_rect(graphics, self.drop_indicator(index), self.theme.drop_area_ink);
        }
        draw_border(graphics, bounds, &self.theme.header_border);
    }

    /// Handle a click: select or close a tab, or press a button.
    pub fn default_mouse_down(
        &mut self,
        pos: Point,
        button: MouseButton,
        _click_count: u32,
        _mods: ModifiersState,
    ) -> bool {
        if button != MouseButton::Left {
            return false;
        }
        let action = if self.maximize_frame.is_some_and(|frame| frame.contains(pos)) {
            self.maximize_button_action()
        } else if self.overflow_frame.is_some_and(|frame| frame.contains(pos)) {
            DockAction::ShowOverflow
        } else if let Some(i) = self.tab_at(pos) {
            let close = self.tabs[i]
                .frame()
                .and_then(|frame| self.tabs[i].close_button_rect(frame, &self.theme));
            if close.is_some_and(|close| close.contains(pos)) {
                DockAction::Close(i)
            } else {
                self.set_current(i);
                DockAction::Select(i)
            }
        } else {
            return false;
        };
        log::debug!("dock header: {action:?}");
        self.action = Some(action);
        true
    }
}

impl Widget for DockHeader {
    fn widget_id(&self) -> WidgetId {
        WidgetId::new("tessel", "DockHeader")
    }

    fn frame(&self) -> Rect {
        self.frame
    }

    fn set_frame(&mut self, frame: Rect) {
        let resized = self.frame.size() != frame.size();
        self.frame = frame;
        if resized {
            self.perform_layout();
            self.update.insert(Update::DRAW);
        }
    }

    fn sizes(&mut self, _hint: Size) -> Sizes {
        self.layout_sizes()
    }

    fn draw(&mut self, graphics: &mut dyn Graphics, dirty: Rect) {
        self.default_draw(graphics, dirty);
    }

    fn mouse_down(
        &mut self,
        pos: Point,
        button: MouseButton,
        click_count: u32,
        mods: ModifiersState,
    ) -> bool {
        self.default_mouse_down(pos, button, click_count, mods)
    }

    fn take_update(&mut self) -> Update {
        std::mem::take(&mut self.update)
    }
}
