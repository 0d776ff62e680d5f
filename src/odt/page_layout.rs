/// Page layout construction from section properties.
///
/// A page layout holds what ODF separates from the master page: page size,
/// orientation, margins, borders, background and the spacing rules of the
/// header and footer areas. Top and bottom margins depend on whether the
/// section really has a header or footer and are completed when the section
/// ends (see [`super::section`]).
use crate::common::RGBColor;
use crate::common::unit::{Pt, twips_to_pt};
use crate::odf::{OdfStyle, PropertyType, StyleFamily};
use crate::odt::OdtOptions;
use crate::odt::text::PictureStore;
use crate::ole::doc::events::PictureResolver;
use crate::ole::doc::parts::{
    BorderCode, BorderOffset, BorderScope, Fill, Orientation, SectionProperties,
};

/// Which pages of a section a layout is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutVariant {
    /// Every page, or every page but the first when the first page is distinct
    Regular,
    /// The distinct first page
    FirstPage,
}

impl LayoutVariant {
    /// Whether page borders with `scope` are drawn on the pages of this variant.
    pub fn has_borders(self, scope: BorderScope) -> bool {
        match self {
            LayoutVariant::Regular => matches!(
                scope,
                BorderScope::AllPages | BorderScope::AllButFirst | BorderScope::WholeDocument
            ),
            LayoutVariant::FirstPage => matches!(
                scope,
                BorderScope::AllPages | BorderScope::FirstPage | BorderScope::WholeDocument
            ),
        }
    }
}

/// Collaborators needed while building page layouts.
pub struct PageContext<'a> {
    pub resolver: &'a mut dyn PictureResolver,
    pub options: &'a OdtOptions,
    /// Background color of the last section with a solid fill
    pub current_background: &'a mut Option<RGBColor>,
    pub pictures: &'a mut PictureStore,
}

#[derive(Clone, Copy)]
enum Edge {
    Top,
    Left,
    Bottom,
    Right,
}

impl Edge {
    fn as_str(self) -> &'static str {
        match self {
            Edge::Top => "top",
            Edge::Left => "left",
            Edge::Bottom => "bottom",
            Edge::Right => "right",
        }
    }
}

/// Build the automatic page layout style for `sep`.
pub fn build_page_layout(
    sep: &SectionProperties,
    variant: LayoutVariant,
    ctx: &mut PageContext<'_>,
) -> OdfStyle {
    let mut layout = OdfStyle::automatic(StyleFamily::PageLayout);

    layout.add_property(PropertyType::PageLayout, "fo:page-width", Pt::from_twips(sep.xa_page as i32));
    layout.add_property(PropertyType::PageLayout, "fo:page-height", Pt::from_twips(sep.ya_page as i32));
    // Word keeps footnotes in the text flow; there is no reserved area
    layout.add_property(PropertyType::PageLayout, "style:footnote-max-height", Pt(0.0));
    layout.add_property(PropertyType::PageLayout, "style:writing-mode", "lr-tb");
    let orientation = match sep.orientation {
        Orientation::Portrait => "portrait",
        Orientation::Landscape => "landscape",
    };
    layout.add_property(PropertyType::PageLayout, "style:print-orientation", orientation);

    if let Some(fill) = &sep.background {
        apply_background(&mut layout, fill, ctx);
    }

    apply_header_spacing(&mut layout, sep);
    apply_footer_spacing(&mut layout, sep, ctx.options);

    layout.add_property(PropertyType::PageLayout, "fo:margin-left", Pt::from_twips(sep.dxa_left as i32));
    layout.add_property(PropertyType::PageLayout, "fo:margin-right", Pt::from_twips(sep.dxa_right as i32));

    if variant.has_borders(sep.border_scope) {
        let edges = [
            (Edge::Top, sep.brc_top, twips_to_pt((sep.dya_top as i32).abs())),
            (Edge::Left, sep.brc_left, twips_to_pt(sep.dxa_left as i32)),
            (Edge::Bottom, sep.brc_bottom, twips_to_pt((sep.dya_bottom as i32).abs())),
            (Edge::Right, sep.brc_right, twips_to_pt(sep.dxa_right as i32)),
        ];
        for (edge, brc, margin) in edges {
            apply_border(&mut layout, edge, &brc, margin, sep.border_offset);
        }
    }

    layout
}

fn apply_background(layout: &mut OdfStyle, fill: &Fill, ctx: &mut PageContext<'_>) {
    match fill {
        Fill::Solid(color) => {
            layout.add_property(PropertyType::PageLayout, "fo:background-color", color.to_odf());
            if *ctx.current_background != Some(*color) {
                log::debug!("Page background changes to {}", color.to_odf());
                *ctx.current_background = Some(*color);
            }
        },
        Fill::Picture(blip) => {
            let Some(path) = ctx.resolver.resolve_picture_path(blip) else {
                log::warn!("Background picture {} could not be resolved", blip.name);
                return;
            };
            if ctx.options.embed_pictures {
                match ctx.resolver.picture_bytes(blip) {
                    Some(bytes) => ctx.pictures.add(&path, bytes),
                    None => log::debug!("No bytes for background picture {}", path),
                }
            }
            layout.add_property_child(
                PropertyType::PageLayout,
                &format!(
                    r#"<style:background-image xlink:href="{}" xlink:type="simple" xlink:actuate="onLoad"/>"#,
                    crate::common::xml::escape_xml(&path)
                ),
            );
        },
        Fill::Other(kind) => {
            log::warn!("Unsupported page background fill type {}, skipped", kind);
        },
    }
}

/// Header area spacing. A non-negative top margin lets the header push the
/// body down; an exact one keeps the header at its place.
fn apply_header_spacing(layout: &mut OdfStyle, sep: &SectionProperties) {
    if sep.dya_top >= 0 {
        let height = (sep.dya_top as i32 - sep.dya_hdr_top as i32).max(0);
        layout.add_property(PropertyType::HeaderStyle, "fo:margin-bottom", Pt(0.0));
        layout.add_property(PropertyType::HeaderStyle, "style:dynamic-spacing", "true");
        layout.add_property(PropertyType::HeaderStyle, "fo:min-height", Pt::from_twips(height));
    } else {
        layout.add_property(PropertyType::HeaderStyle, "fo:margin-bottom", Pt(0.0));
    }
}

fn apply_footer_spacing(layout: &mut OdfStyle, sep: &SectionProperties, options: &OdtOptions) {
    if sep.dya_bottom >= 0 {
        let height = (sep.dya_bottom as i32 - sep.dya_hdr_bottom as i32).max(0);
        layout.add_property(PropertyType::FooterStyle, "fo:margin-top", Pt(0.0));
        layout.add_property(PropertyType::FooterStyle, "style:dynamic-spacing", "true");
        layout.add_property(PropertyType::FooterStyle, "fo:min-height", Pt::from_twips(height));
    } else {
        // Approximation: Word does not store the distance between body and footer
        let computed = twips_to_pt((sep.dya_bottom as i32).abs() - sep.dya_hdr_bottom as i32);
        let margin = computed.max(options.footer_margin_floor_pt);
        layout.add_property(PropertyType::FooterStyle, "fo:margin-top", Pt(margin));
    }
}

/// Border of one edge plus the padding/margin split it implies.
///
/// `margin` is the section margin of that edge in points. Word measures the
/// border distance either from the text or from the page edge.
fn apply_border(layout: &mut OdfStyle, edge: Edge, brc: &BorderCode, margin: f64, offset: BorderOffset) {
    let Some(border) = brc.to_odf() else {
        return;
    };
    let edge = edge.as_str();
    layout.add_property(PropertyType::PageLayout, &format!("fo:border-{}", edge), border);

    let space = brc.space as f64;
    let rest = (margin - space - brc.width_pt()).max(0.0);
    let (padding, margin) = match offset {
        BorderOffset::FromText => (space, rest),
        BorderOffset::FromEdge => (rest, space),
    };
    layout.add_property(PropertyType::PageLayout, &format!("fo:padding-{}", edge), Pt(padding));
    layout.add_property(PropertyType::PageLayout, &format!("fo:margin-{}", edge), Pt(margin));
}
