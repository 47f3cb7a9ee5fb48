//! Fluent row binding.
//!
//! [`RowBinder`] pairs a row's [`ViewCache`] with the view tree for the
//! duration of one bind. Every setter resolves its target through the cache,
//! applies one change and hands the binder back, so binding code reads as a
//! chain:
//!
//! ```ignore
//! row.set_text(TITLE, &item.title)?
//!     .set_checked(DONE, item.done)?
//!     .set_gone_if(BADGE, item.badge.is_none())?;
//! ```
//!
//! None of the setters check the widget kind up front. Using a text setter on
//! an image fails with [`Error::TypeMismatch`] at the point of use.

use std::any::Any;
use std::sync::Arc;

use horizon_recycler_core::{
    Bitmap, CheckBox, Color, Drawable, ImageView, LayoutParams, TextView, ViewId, ViewIdent,
    ViewNode, ViewTree, Visibility,
};

use crate::error::{Error, Result};
use crate::holder::{Tag, ViewCache, ViewHolder};

/// Loads an image from an address into an image view.
///
/// Fetching, caching, placeholders and retries are entirely up to the
/// implementation. `target` identifies the view for loaders that complete
/// later and need to find it again.
pub trait ImageBinder {
    fn bind(&self, target: ViewId, image: &mut ImageView, url: &str);
}

impl<F> ImageBinder for F
where
    F: Fn(ViewId, &mut ImageView, &str),
{
    fn bind(&self, target: ViewId, image: &mut ImageView, url: &str) {
        self(target, image, url)
    }
}

/// Chainable access to the child views of one row.
pub struct RowBinder<'a> {
    holder: &'a mut ViewCache,
    tree: &'a mut ViewTree,
}

impl<'a> RowBinder<'a> {
    /// Bind through `holder` into `tree`.
    pub fn new(holder: &'a mut ViewCache, tree: &'a mut ViewTree) -> Self {
        Self { holder, tree }
    }

    /// The row's holder.
    pub fn holder(&self) -> &ViewCache {
        &*self.holder
    }

    /// Mutable access to the row's holder.
    pub fn holder_mut(&mut self) -> &mut ViewCache {
        self.holder
    }

    /// The view tree the row lives in.
    pub fn tree(&self) -> &ViewTree {
        &*self.tree
    }

    /// Mutable access to the view tree.
    pub fn tree_mut(&mut self) -> &mut ViewTree {
        self.tree
    }

    /// The view lookups currently start from.
    pub fn find_view(&self) -> ViewId {
        self.holder.find_view()
    }

    /// Move lookups to the `index`-th direct child of the row root, or back
    /// to the root for a negative index.
    pub fn set_find_view_at(&mut self, index: isize) -> Result<&mut Self> {
        self.holder.set_find_view_at(self.tree, index)?;
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Lookup
    // -------------------------------------------------------------------------

    /// Resolve `ident` to a view id.
    pub fn view_id(&mut self, ident: ViewIdent) -> Result<ViewId> {
        self.holder.resolve(self.tree, ident)
    }

    /// The node for `ident`.
    pub fn view(&mut self, ident: ViewIdent) -> Result<&mut ViewNode> {
        let id = self.view_id(ident)?;
        Ok(self.tree.get_mut(id)?)
    }

    /// The text payload of `ident`.
    pub fn text_view(&mut self, ident: ViewIdent) -> Result<&mut TextView> {
        let id = self.view_id(ident)?;
        self.tree
            .text_mut(id)
            .map_err(|err| Error::from_lookup(ident, err))
    }

    /// The image payload of `ident`.
    pub fn image_view(&mut self, ident: ViewIdent) -> Result<&mut ImageView> {
        let id = self.view_id(ident)?;
        self.tree
            .image_mut(id)
            .map_err(|err| Error::from_lookup(ident, err))
    }

    /// The check box payload of `ident`.
    pub fn check_box(&mut self, ident: ViewIdent) -> Result<&mut CheckBox> {
        let id = self.view_id(ident)?;
        self.tree
            .check_box_mut(id)
            .map_err(|err| Error::from_lookup(ident, err))
    }

    // -------------------------------------------------------------------------
    // Holder tags
    // -------------------------------------------------------------------------

    /// Store a value in the row's tag store.
    pub fn put_tag<V: Any + Send + Sync>(&mut self, key: i32, value: V) -> &mut Self {
        self.holder.put_tag(key, value);
        self
    }

    /// The holder tag stored under `key`.
    pub fn tag(&self, key: i32) -> Option<&Tag> {
        self.holder.tag(key)
    }

    /// The holder tag stored under `key`, if it has type `V`.
    pub fn tag_as<V: Any>(&self, key: i32) -> Option<&V> {
        self.holder.tag_as(key)
    }

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    /// Set the text of `ident`.
    pub fn set_text(&mut self, ident: ViewIdent, text: impl Into<String>) -> Result<&mut Self> {
        self.text_view(ident)?.set_text(text);
        Ok(self)
    }

    /// Set text from a string resource.
    pub fn set_text_resource(&mut self, ident: ViewIdent, resource: u32) -> Result<&mut Self> {
        self.text_view(ident)?.set_text_resource(resource);
        Ok(self)
    }

    /// Set the text color of `ident`.
    pub fn set_text_color(&mut self, ident: ViewIdent, color: Color) -> Result<&mut Self> {
        self.text_view(ident)?.set_color(color);
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Images
    // -------------------------------------------------------------------------

    /// Show an image resource in `ident`.
    pub fn set_image_resource(&mut self, ident: ViewIdent, resource: u32) -> Result<&mut Self> {
        self.image_view(ident)?.set_resource(resource);
        Ok(self)
    }

    /// Show a bitmap in `ident`.
    pub fn set_image_bitmap(&mut self, ident: ViewIdent, bitmap: Arc<Bitmap>) -> Result<&mut Self> {
        self.image_view(ident)?.set_bitmap(bitmap);
        Ok(self)
    }

    /// Set a drawable, or clear the image with `None`.
    pub fn set_image_drawable(
        &mut self,
        ident: ViewIdent,
        drawable: Option<Arc<Drawable>>,
    ) -> Result<&mut Self> {
        self.image_view(ident)?.set_drawable(drawable);
        Ok(self)
    }

    /// Hand the image view and `url` to `binder`.
    pub fn bind_image<B>(&mut self, ident: ViewIdent, url: &str, binder: &B) -> Result<&mut Self>
    where
        B: ImageBinder + ?Sized,
    {
        let id = self.view_id(ident)?;
        let image = self
            .tree
            .image_mut(id)
            .map_err(|err| Error::from_lookup(ident, err))?;
        binder.bind(id, image, url);
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Check boxes
    // -------------------------------------------------------------------------

    /// Set the checked state of `ident`.
    pub fn set_checked(&mut self, ident: ViewIdent, checked: bool) -> Result<&mut Self> {
        self.check_box(ident)?.set_checked(checked);
        Ok(self)
    }

    /// Flip the checked state of `ident`.
    pub fn toggle(&mut self, ident: ViewIdent) -> Result<&mut Self> {
        self.check_box(ident)?.toggle();
        Ok(self)
    }

    // -------------------------------------------------------------------------
    // Any view
    // -------------------------------------------------------------------------

    /// Attach an opaque value to the child view itself.
    pub fn set_tag<V: Any + Send + Sync>(&mut self, ident: ViewIdent, tag: V) -> Result<&mut Self> {
        self.view(ident)?.set_tag(Some(Arc::new(tag)));
        Ok(self)
    }

    /// Set the background resource of `ident`.
    pub fn set_background_resource(&mut self, ident: ViewIdent, resource: u32) -> Result<&mut Self> {
        self.view(ident)?.set_background_resource(resource);
        Ok(self)
    }

    /// Install a click listener on `ident`.
    pub fn set_on_click_listener<F>(&mut self, ident: ViewIdent, listener: F) -> Result<&mut Self>
    where
        F: Fn(ViewId) + Send + Sync + 'static,
    {
        self.view(ident)?.set_on_click_listener(Some(Arc::new(listener)));
        Ok(self)
    }

    /// Remove the click listener of `ident`.
    pub fn clear_on_click_listener(&mut self, ident: ViewIdent) -> Result<&mut Self> {
        self.view(ident)?.set_on_click_listener(None);
        Ok(self)
    }

    /// Install a long-click listener on `ident`.
    pub fn set_on_long_click_listener<F>(
        &mut self,
        ident: ViewIdent,
        listener: F,
    ) -> Result<&mut Self>
    where
        F: Fn(ViewId) -> bool + Send + Sync + 'static,
    {
        self.view(ident)?
            .set_on_long_click_listener(Some(Arc::new(listener)));
        Ok(self)
    }

    /// Remove the long-click listener of `ident`.
    pub fn clear_on_long_click_listener(&mut self, ident: ViewIdent) -> Result<&mut Self> {
        self.view(ident)?.set_on_long_click_listener(None);
        Ok(self)
    }

    /// Set the visibility of `ident`.
    pub fn set_visibility(&mut self, ident: ViewIdent, visibility: Visibility) -> Result<&mut Self> {
        self.view(ident)?.set_visibility(visibility);
        Ok(self)
    }

    /// Hide `ident` and release its space.
    pub fn set_gone(&mut self, ident: ViewIdent) -> Result<&mut Self> {
        self.set_gone_if(ident, true)
    }

    /// `Gone` when `gone`, otherwise `Visible`.
    pub fn set_gone_if(&mut self, ident: ViewIdent, gone: bool) -> Result<&mut Self> {
        let visibility = if gone {
            Visibility::Gone
        } else {
            Visibility::Visible
        };
        self.set_visibility(ident, visibility)
    }

    /// Hide `ident` but keep its space.
    pub fn set_invisible(&mut self, ident: ViewIdent) -> Result<&mut Self> {
        self.set_invisible_if(ident, true)
    }

    /// `Invisible` when `invisible`, otherwise `Visible`.
    pub fn set_invisible_if(&mut self, ident: ViewIdent, invisible: bool) -> Result<&mut Self> {
        let visibility = if invisible {
            Visibility::Invisible
        } else {
            Visibility::Visible
        };
        self.set_visibility(ident, visibility)
    }

    /// Show `ident`.
    pub fn set_visible(&mut self, ident: ViewIdent) -> Result<&mut Self> {
        self.set_visible_if(ident, true)
    }

    /// `Visible` when `visible`, otherwise `Gone`.
    pub fn set_visible_if(&mut self, ident: ViewIdent, visible: bool) -> Result<&mut Self> {
        let visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Gone
        };
        self.set_visibility(ident, visibility)
    }

    /// Replace the layout params of `ident`.
    pub fn set_layout_params(&mut self, ident: ViewIdent, params: LayoutParams) -> Result<&mut Self> {
        self.view(ident)?.set_layout_params(params);
        Ok(self)
    }
}

impl ViewHolder for RowBinder<'_> {
    fn convert_view(&self) -> ViewId {
        self.holder.convert_view()
    }
}
