pub mod guide_xml;
